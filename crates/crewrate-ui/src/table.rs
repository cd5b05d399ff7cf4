//! Plain-text tables with aligned columns.

/// Renders a table with a header row, a dashed separator, and one line per
/// row. Columns are left-aligned and separated by two spaces; trailing
/// whitespace is trimmed from every line.
///
/// Returns an empty string when there are no rows.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_cells(headers.iter().copied(), &widths));
    lines.push(join_cells(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in rows {
        lines.push(join_cells(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

/// Renders label/value pairs with the values aligned in one column.
pub fn render_pairs(pairs: &[(String, String)]) -> String {
    let width = pairs
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    pairs
        .iter()
        .map(|(label, value)| format!("{label:<width$}{value}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_cells<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        line.push_str(&format!("{:<width$}", cell.as_ref()));
    }
    line.trim_end().to_string()
}
