//! One-line selector with a hotkey before each option, e.g.
//! `a All  f 5 min  [t 30 min]  h 1 hour`.

use ratatui::text::{Line, Span};

use crate::theme;

/// Render `(key, label)` options with the one at `active` highlighted.
pub fn render_sub_tabs<'a>(options: &[(&'a str, &'a str)], active: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(options.len() * 3);

    for (i, (key, label)) in options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, theme::key_hint_key()));
        spans.push(Span::raw(" "));
        if i == active {
            spans.push(Span::styled(format!("[{label}]"), theme::tab_active()));
        } else {
            spans.push(Span::styled(*label, theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn active_option_is_bracketed() {
        let line = render_sub_tabs(&[("a", "All"), ("h", "1 hour")], 1);
        assert_eq!(text(&line), "a All  h [1 hour]");
    }

    #[test]
    fn out_of_range_active_highlights_nothing() {
        let line = render_sub_tabs(&[("a", "All")], 5);
        assert_eq!(text(&line), "a All");
    }
}
