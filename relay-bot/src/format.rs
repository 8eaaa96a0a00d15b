//! Response formatting: dialect escaping and length-bounded chunking.

use relay_core::MarkupDialect;

/// Telegram's message size limit, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

const MARKDOWN_RESERVED: &[char] = &['_', '*', '[', '`'];

/// Escapes every reserved character of `dialect` in one pass. Characters outside the reserved
/// set are never touched; a backslash already present is itself escaped under MarkdownV2.
pub fn escape(text: &str, dialect: MarkupDialect) -> String {
    match dialect {
        MarkupDialect::Plain => text.to_string(),
        MarkupDialect::Markdown => backslash_escape(text, MARKDOWN_RESERVED),
        MarkupDialect::MarkdownV2 => backslash_escape(text, MARKDOWN_V2_RESERVED),
        MarkupDialect::Html => {
            let mut out = String::with_capacity(text.len());
            for c in text.chars() {
                match c {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    _ => out.push(c),
                }
            }
            out
        }
    }
}

fn backslash_escape(text: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if reserved.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Splits `text` into consecutive pieces of at most `max_size` UTF-16 code units, the unit
/// Telegram measures message length in. A char is never split, so astral-plane characters count
/// as two and a piece may end one unit short. Purely length-based otherwise: words, markup and
/// escape sequences may be cut. Empty input yields no chunks; `max_size` below 2 still emits one
/// char per piece.
pub fn chunk(text: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut units = 0;

    for c in text.chars() {
        let width = c.len_utf16();
        if units + width > max_size && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            units = 0;
        }
        current.push(c);
        units += width;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
