//! Palette and semantic styles for the TUI.

use ratatui::style::{Color, Modifier, Style};

use netwatch_core::SeriesColor;

// ── Palette ─────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const BLUE: Color = Color::Rgb(98, 160, 255); // #62a0ff
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ORANGE: Color = Color::Rgb(255, 184, 108); // #ffb86c
pub const PURPLE: Color = Color::Rgb(189, 147, 249); // #bd93f9
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

/// Terminal color for a chart series slot.
pub const fn series(color: SeriesColor) -> Color {
    match color {
        SeriesColor::Blue => BLUE,
        SeriesColor::Green => GREEN,
        SeriesColor::Gray => DIM_WHITE,
        SeriesColor::Orange => ORANGE,
        SeriesColor::Purple => PURPLE,
    }
}

// ── Semantic styles ─────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(GRAY)
}

pub fn border_alert() -> Style {
    Style::default().fg(RED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn muted() -> Style {
    Style::default().fg(GRAY)
}

pub fn key_hint() -> Style {
    Style::default().fg(GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn online() -> Style {
    Style::default().fg(GREEN)
}

pub fn offline() -> Style {
    Style::default().fg(RED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_series_slot_has_a_distinct_color() {
        let colors = [
            SeriesColor::Blue,
            SeriesColor::Green,
            SeriesColor::Gray,
            SeriesColor::Orange,
            SeriesColor::Purple,
        ]
        .map(series);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
