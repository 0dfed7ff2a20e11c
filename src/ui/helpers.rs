//! Shared rendering utilities.
//!
//! Widths are measured in characters, not bytes: prices carry `£` and the
//! badges and step icons are multi-byte glyphs.

/// Positions the cursor at a specific row and column (1-indexed).
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text`, one column per character.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` columns, ending with `…` when cut.
///
/// ```rust
/// use skiphire::ui::helpers::truncate;
///
/// assert_eq!(truncate("8 Yard Skip", 20), "8 Yard Skip");
/// assert_eq!(truncate("8 Yard Skip", 6), "8 Yar…");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Prints `text` centered in a line of `cols` columns, padded on both sides.
pub fn print_centered(text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text_width(&text);
    let padding = cols.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_characters() {
        assert_eq!(text_width("£354"), 4);
        assert_eq!(text_width("⚠ Not Allowed On The Road"), 25);
    }

    #[test]
    fn truncate_respects_multibyte_text() {
        assert_eq!(truncate("£1,234.50", 4), "£1,…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
