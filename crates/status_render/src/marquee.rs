/// Spaces appended to overflowing text so the end of one cycle is visually separated from the start of the next.
pub const MARQUEE_SEPARATOR: &str = "   ";

/// Render a `width` characters wide window into `text`, scrolled by `offset` characters.
///
/// Text that already fits is padded on the right and does not move. Longer text is treated as
/// circular (with [MARQUEE_SEPARATOR] appended), so the output repeats every `len(text) + 3` offsets.
/// Lengths are counted in chars, not bytes.
pub fn marquee(text: &str, offset: usize, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return format!("{:<width$}", text, width = width);
    }

    let padded: Vec<char> = text.chars().chain(MARQUEE_SEPARATOR.chars()).collect();
    let start = offset % padded.len();
    padded.iter().chain(padded.iter()).skip(start).take(width).collect()
}

/// Escape text for use inside pango markup. Quotes are left alone, as the text never ends up in an attribute.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
