//! Plain aligned text tables.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 6;

/// Render rows under `headers`, numbers right-aligned, others left-aligned.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, &width)| pad(&truncate(header, width), width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, &width)| {
                let text = truncate(row.get(index).map_or("-", String::as_str), width);
                let padded = pad(&text, width, looks_numeric(&text));
                if options.color {
                    colorize(&padded, &text)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Narrow the widest column one step at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

/// Highlight quality labels. `padded` keeps its alignment.
fn colorize(padded: &str, text: &str) -> String {
    let code = match text {
        "good" | "true" | "Has EAN" => "32",
        "bad" | "false" | "Missing EAN" => "31",
        _ => return padded.to_string(),
    };
    padded.replacen(text, &format!("\u{1b}[{code}m{text}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_and_numbers_right_justify() {
        let rows = vec![
            vec!["Acme".to_string(), "3".to_string()],
            vec!["Bosch Power Tools".to_string(), "12".to_string()],
        ];
        let table = render_rows(&["Manufacturer name", "bad"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Manufacturer name  bad   ");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "Acme                    3");
        assert_eq!(lines[3], "Bosch Power Tools      12");
    }

    #[test]
    fn wide_tables_truncate_cells() {
        let rows = vec![vec!["x".repeat(50), "1".to_string()]];
        let table = render_rows(
            &["name", "n"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let line = table.lines().nth(2).unwrap();
        assert!(line.contains('…'));
        assert!(line.chars().count() <= 20);
    }

    #[test]
    fn quality_labels_are_colored() {
        let out = colorize("bad   ", "bad");
        assert!(out.starts_with("\u{1b}[31mbad"));
        assert!(out.ends_with("   "));
        assert_eq!(colorize("Acme", "Acme"), "Acme");
    }
}
