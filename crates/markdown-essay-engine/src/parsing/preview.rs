use crate::attribution;

/// Maximum preview length, in characters, before truncation.
pub const PREVIEW_CHARS: usize = 60;

const SMART_QUOTES: &[char] = &['“', '”', '‘', '’', '"'];

/// Truncates to `max` characters with a "..." suffix if needed.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Preview for the first line of a quoted passage: quote marker, leading
/// smart-quote glyphs and any attribution sigil are removed first.
pub fn quote_preview(first_line: &str, max: usize) -> String {
    let unquoted = first_line.trim_start().trim_start_matches('>').trim_start();
    let unquoted = unquoted.trim_start_matches(SMART_QUOTES);
    preview(&attribution::strip(unquoted), max)
}
