//! Text Measurement
//!
//! Label text is measured in terminal-style cells using `unicode-width`:
//! CJK and most emoji take 2 cells, combining marks take 0.

use unicode_width::UnicodeWidthStr;

/// Measure the display width of a single line in cells.
pub fn string_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Measure a (possibly multi-line) text block: (widest line, line count).
///
/// Empty text measures (0, 0).
pub fn measure_text(text: &str) -> (u16, u16) {
    if text.is_empty() {
        return (0, 0);
    }
    let mut width = 0u16;
    let mut lines = 0u16;
    for line in text.lines() {
        width = width.max(string_width(line));
        lines = lines.saturating_add(1);
    }
    (width, lines.max(1))
}
