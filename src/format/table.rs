//! Plain-text table rendering for CLI output

/// Render a bordered table with fixed column widths, wrapping cell content
/// that exceeds its column.
pub(crate) fn render_table(headers: &[&str], widths: &[usize], rows: &[Vec<String>]) -> String {
    debug_assert_eq!(headers.len(), widths.len());

    let mut out = String::new();
    let border = border_line(widths);

    out.push_str(&border);
    out.push_str(&format_row(
        &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
        widths,
    ));
    out.push_str(&border);
    for row in rows {
        out.push_str(&format_row(row, widths));
    }
    out.push_str(&border);
    out
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| wrap(cell, width))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

    let mut out = String::new();
    for line_index in 0..height {
        out.push('|');
        for (column, &width) in wrapped.iter().zip(widths) {
            let content = column.get(line_index).map(String::as_str).unwrap_or("");
            out.push(' ');
            out.push_str(content);
            out.push_str(&" ".repeat(width.saturating_sub(content.chars().count())));
            out.push_str(" |");
        }
        out.push('\n');
    }
    out
}

/// Split text into chunks of at most `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_and_rows() {
        let table = render_table(
            &["#", "Name"],
            &[3, 8],
            &[
                vec!["1".to_string(), "alice".to_string()],
                vec!["2".to_string(), "bob".to_string()],
            ],
        );
        assert!(table.contains("| #"));
        assert!(table.contains("| alice"));
        assert!(table.contains("| bob"));
        assert!(table.starts_with("+-----+----------+\n"));
    }

    #[test]
    fn wraps_long_cells_onto_extra_lines() {
        let table = render_table(
            &["Value"],
            &[4],
            &[vec!["abcdefgh".to_string()]],
        );
        assert!(table.contains("| abcd |"));
        assert!(table.contains("| efgh |"));
    }
}
