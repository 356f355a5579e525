// ── Cell text for record tables ──
//
// Shared by the CLI tables and the TUI history screen so both render a
// missing value the same way.

use crate::model::Stamp;

/// Shown in place of a missing value.
pub const MISSING: &str = "-";

/// Two decimals, or [`MISSING`].
pub fn amount(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.into(), |v| format!("{v:.2}"))
}

/// The timestamp exactly as the server sent it.
pub fn stamp(value: Option<&Stamp>) -> String {
    value.map_or_else(|| MISSING.into(), |s| s.raw().to_owned())
}

pub fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| MISSING.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(amount(Some(5.456)), "5.46");
        assert_eq!(amount(Some(0.0)), "0.00");
        assert_eq!(amount(None), "-");
    }

    #[test]
    fn stamp_keeps_unparseable_text() {
        assert_eq!(stamp(Some(&Stamp::parse("yesterday"))), "yesterday");
        assert_eq!(stamp(None), "-");
    }

    #[test]
    fn missing_text_is_a_dash() {
        assert_eq!(text(Some(&"nas".to_owned())), "nas");
        assert_eq!(text(None), "-");
    }
}
