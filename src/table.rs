//! Plain-text table rendering for terminal previews.

use std::fmt::Write as _;

/// Cells wider than this are cut and suffixed with `...`.
pub const MAX_CELL_WIDTH: usize = 40;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let headers = headers.iter().map(|h| fit_cell(h)).collect::<Vec<_>>();
    let rows = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|idx| fit_cell(row.get(idx).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, &headers, &widths);
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    push_line(&mut output, &rule, &widths);
    for row in &rows {
        push_line(&mut output, row, &widths);
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    let _ = writeln!(output, "{}", line.trim_end());
}

fn fit_cell(value: &str) -> String {
    let flattened = value.replace(['\n', '\r', '\t'], " ");
    if flattened.chars().count() <= MAX_CELL_WIDTH {
        return flattened;
    }
    let mut cut = flattened
        .chars()
        .take(MAX_CELL_WIDTH.saturating_sub(3))
        .collect::<String>();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn columns_are_aligned() {
        let rendered = render_table(
            &strings(&["Name", "Phone"]),
            &[strings(&["Ann", "5552223333"]), strings(&["Robert", ""])],
        );
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "Name    Phone",
                "------  ----------",
                "Ann     5552223333",
                "Robert",
            ]
        );
    }

    #[test]
    fn long_and_multiline_cells_are_flattened() {
        let rendered = render_table(&strings(&["note"]), &[strings(&["a\nb\tc"])]);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[2], "a b c");
        let rendered = render_table(&strings(&["note"]), &[vec!["y".repeat(50)]]);
        let last = rendered.lines().last().expect("row line");
        assert_eq!(last.chars().count(), MAX_CELL_WIDTH);
        assert!(last.ends_with("..."));
    }
}
