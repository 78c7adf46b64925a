//! Item body formatting.
//!
//! Turns an [`Item`] into the lines shown in the item body view: three
//! metadata lines followed by the content hard-wrapped to a fixed width.

use crate::domain::Item;

/// Widest body line, even on wide terminals.
pub const MAX_BODY_WIDTH: usize = 80;

/// Publish date layout, e.g. `2024 Jan 01 00:00:00 +0000 UTC`.
pub const DATE_FORMAT: &str = "%Y %b %d %H:%M:%S %z %Z";

/// Number of unwrapped lines placed ahead of the body.
pub const METADATA_LINES: usize = 3;

/// An item ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedItem {
    pub title: String,
    pub lines: Vec<String>,
}

/// Hard-wrap `text` to `width` characters per line.
///
/// Splits on `char` boundaries only. A `\n` ends the current line and is
/// dropped; a full line is flushed when the next character arrives and that
/// character starts the following line. The last line is always emitted.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut count = 0;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut line));
            count = 0;
        } else if count >= width {
            lines.push(std::mem::take(&mut line));
            line.push(c);
            count = 1;
        } else {
            line.push(c);
            count += 1;
        }
    }
    lines.push(line);

    lines
}

/// Build the title and display lines for `item`, wrapping its content to `width`.
pub fn format_item(item: &Item, width: usize) -> FormattedItem {
    let date = item
        .published_at
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = Vec::with_capacity(METADATA_LINES + 1);
    lines.push(format!("Date: {}", date));
    lines.push(format!("Link: {}", item.link));
    lines.push(String::new());
    // The terminal drops `\r`, so it must not take up a column.
    lines.extend(wrap(&item.content.replace("\r\n", "\n"), width));

    FormattedItem {
        title: item.title.clone(),
        lines,
    }
}

/// Body width for a viewport `viewport_width` columns wide.
pub fn body_width(viewport_width: u16) -> usize {
    (viewport_width as usize).clamp(1, MAX_BODY_WIDTH)
}
