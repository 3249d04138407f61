// src/report/table.rs
use crate::extractors::{ResultRecord, COLUMNS};

/// Cells wider than this are cut and end in `...`.
const MAX_CELL_WIDTH: usize = 60;

/// Renders records as a plain-text table with a header row.
pub fn render_table(records: &[ResultRecord]) -> String {
    let include_found_at = records.iter().any(|r| r.found_at.is_some());
    let header: Vec<&str> = COLUMNS[..if include_found_at { 5 } else { 4 }].to_vec();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.cells(include_found_at).into_iter().map(truncate).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, found_at: Option<&str>) -> ResultRecord {
        ResultRecord {
            title: title.into(),
            url: "https://example.com".into(),
            site_name: "Example".into(),
            favicon_url: "N/A".into(),
            found_at: found_at.map(str::to_string),
        }
    }

    #[test]
    fn header_and_rows_line_up() {
        let table = render_table(&[record("Short", None), record("A longer title", None)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("title          | url"));
        assert!(!lines[0].contains("found_at"));
        assert!(lines[1].starts_with("-------------- | ---"));
        assert!(lines[3].starts_with("A longer title | https://example.com"));
    }

    #[test]
    fn found_at_column_only_for_scanner_records() {
        let table = render_table(&[record("X", Some("tool"))]);
        assert!(table.lines().next().unwrap().ends_with("found_at"));
        assert!(table.lines().nth(2).unwrap().ends_with("tool"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(100);
        let table = render_table(&[record(&long, None)]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with(&format!("{}...", "x".repeat(MAX_CELL_WIDTH - 3))));
        assert!(!row.contains(&long));
    }
}
