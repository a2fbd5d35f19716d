//! Display-width helpers. Widths are terminal cells, not bytes or chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Horizontal alignment inside a fixed-width column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `width` cells.
pub fn truncate_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Truncate or space-fill `value` to exactly `width` cells.
pub fn pad(value: &str, width: usize, align: Align) -> String {
    let text = truncate_to_width(value, width);
    let fill = " ".repeat(width.saturating_sub(visible_width(text)));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}
