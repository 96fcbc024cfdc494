//! Plain-text rendering of a presented proposal.

use std::fmt::Write as _;

use crate::api::{DisplayLine, DisplayLineKind, ViewMode};
use crate::review::Presentation;

const GAP_GLYPH: &str = "⋯";
const NUMBER_WIDTH: usize = 5;

/// Default width of one side-by-side column.
pub const DEFAULT_COLUMN_WIDTH: usize = 60;

/// Render `presentation` in its active view mode.
#[must_use]
pub fn render(presentation: &Presentation) -> String {
    match presentation.view_mode {
        ViewMode::Unified => render_unified(presentation),
        ViewMode::SideBySide => render_side_by_side(presentation, DEFAULT_COLUMN_WIDTH),
    }
}

/// Render the header and a single interleaved stream of lines.
#[must_use]
pub fn render_unified(presentation: &Presentation) -> String {
    let mut out = header(presentation);
    for line in &presentation.lines {
        if line.is_gap() {
            let _ = writeln!(out, "{:>width$}  {GAP_GLYPH}", "", width = NUMBER_WIDTH * 2);
            continue;
        }
        let _ = writeln!(
            out,
            "{} {} {} {}",
            number(line.old_line),
            number(line.new_line),
            marker(line.kind),
            line.text
        );
    }
    out
}

/// Render the header and two columns, each cut to `column_width` chars.
///
/// Runs of deletions are paired row by row with the additions that follow
/// them; context lines and gaps occupy both columns.
#[must_use]
pub fn render_side_by_side(presentation: &Presentation, column_width: usize) -> String {
    let mut out = header(presentation);
    for (before, after) in pair_rows(&presentation.lines) {
        let left = cell(before, |line| line.old_line, column_width);
        let right = cell(after, |line| line.new_line, column_width);
        let _ = writeln!(out, "{left} │ {right}");
    }
    out
}

fn header(presentation: &Presentation) -> String {
    let mut out = format!(
        "{} ({}, {})\n",
        presentation.file_path,
        presentation.summary(),
        presentation.impact.badge()
    );
    if !presentation.reason.trim().is_empty() {
        let _ = writeln!(out, "reason: {}", presentation.reason.trim());
    }
    if presentation.is_noop() {
        out.push_str("no changes\n");
    }
    out
}

type Row<'a> = (Option<&'a DisplayLine>, Option<&'a DisplayLine>);

fn pair_rows(lines: &[DisplayLine]) -> Vec<Row<'_>> {
    let mut rows = Vec::with_capacity(lines.len());
    let mut index = 0;
    while index < lines.len() {
        match lines[index].kind {
            DisplayLineKind::Context | DisplayLineKind::Gap => {
                rows.push((Some(&lines[index]), Some(&lines[index])));
                index += 1;
            }
            DisplayLineKind::Deleted | DisplayLineKind::Added => {
                let start = index;
                while index < lines.len() && lines[index].kind == DisplayLineKind::Deleted {
                    index += 1;
                }
                let split = index;
                while index < lines.len() && lines[index].kind == DisplayLineKind::Added {
                    index += 1;
                }

                let removed = &lines[start..split];
                let added = &lines[split..index];
                for row in 0..removed.len().max(added.len()) {
                    rows.push((removed.get(row), added.get(row)));
                }
            }
        }
    }
    rows
}

fn cell(
    line: Option<&DisplayLine>,
    line_number: impl Fn(&DisplayLine) -> Option<usize>,
    width: usize,
) -> String {
    let body = match line {
        None => String::new(),
        Some(line) if line.is_gap() => GAP_GLYPH.to_owned(),
        Some(line) => format!(
            "{} {} {}",
            number(line_number(line)),
            marker(line.kind),
            line.text
        ),
    };
    fit(&body, width)
}

fn number(line: Option<usize>) -> String {
    line.map_or_else(
        || " ".repeat(NUMBER_WIDTH),
        |n| format!("{n:>width$}", width = NUMBER_WIDTH),
    )
}

const fn marker(kind: DisplayLineKind) -> char {
    match kind {
        DisplayLineKind::Added => '+',
        DisplayLineKind::Deleted => '-',
        DisplayLineKind::Context | DisplayLineKind::Gap => ' ',
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text}{}", " ".repeat(width - count));
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        cut.push('…');
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EditOp, Proposal};
    use crate::config::ReviewConfig;
    use crate::keys::ShortcutHub;
    use crate::review::ReviewController;

    fn presented(view_mode: ViewMode) -> Presentation {
        let config = ReviewConfig {
            default_view: view_mode,
            ..ReviewConfig::default()
        };
        let mut controller = ReviewController::new(&config, ShortcutHub::new());
        let proposal = Proposal::new(
            "src/f.js",
            "function f() {\n  return 1\n}",
            "function f() {\n  return 2\n}",
        )
        .with_reason("bump return value");
        controller.present(proposal).expect("present").clone()
    }

    fn sample_lines() -> Vec<DisplayLine> {
        vec![
            DisplayLine::from(&EditOp::equal("function f() {", 1, 1)),
            DisplayLine::from(&EditOp::delete("  return 1", 2)),
            DisplayLine::from(&EditOp::insert("  return 2", 2)),
            DisplayLine::from(&EditOp::equal("}", 3, 3)),
        ]
    }

    #[test]
    fn unified_marks_each_line() {
        let text = render(&presented(ViewMode::Unified));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "src/f.js (+1/-1, low impact)");
        assert_eq!(lines[1], "reason: bump return value");
        assert_eq!(lines[2], "    1     1   function f() {");
        assert_eq!(lines[3], "    2       -   return 1");
        assert_eq!(lines[4], "          2 +   return 2");
        assert_eq!(lines[5], "    3     3   }");
    }

    #[test]
    fn side_by_side_pairs_replacements() {
        let text = render_side_by_side(&presented(ViewMode::SideBySide), 20);
        let rows: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("    2 -   return 1"));
        assert!(rows[1].ends_with("    2 +   return 2  "));
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn gaps_render_in_both_columns() {
        let mut lines = sample_lines();
        lines.push(DisplayLine::gap());
        let rows = pair_rows(&lines);
        let (left, right) = rows[rows.len() - 1];
        assert!(left.is_some_and(DisplayLine::is_gap));
        assert!(right.is_some_and(DisplayLine::is_gap));
    }
}
