//! Tolerant helpers for scanning listing-page markup.
//!
//! Deliberately not a full HTML parser: case-insensitive tag detection,
//! local scanning within known blocks, and light whitespace/entity
//! normalization are enough for the pages this crate reads, and the
//! helpers stay testable offline against captured fixtures.

/// Case-insensitive substring search at or after `from`.
pub fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
        .map(|at| at + from)
}

fn is_name_boundary(byte: Option<u8>) -> bool {
    match byte {
        None => true,
        Some(b) => !(b.is_ascii_alphanumeric() || b == b'-'),
    }
}

/// Next occurrence of `pattern` that is a whole tag name, not a prefix of
/// a longer one (`<div` must not match `<divider`).
fn next_tag(html: &str, pattern: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(at) = find_ci(html, pattern, cursor) {
        if is_name_boundary(html.as_bytes().get(at + pattern.len()).copied()) {
            return Some(at);
        }
        cursor = at + 1;
    }
    None
}

/// The `<...>` slice of the tag starting at `start`.
fn open_tag(html: &str, start: usize) -> Option<&str> {
    html[start..].find('>').map(|at| &html[start..=start + at])
}

/// The value of `attr` in the element's open tag. Handles single, double
/// and missing quotes.
pub fn attr_value<'a>(block: &'a str, attr: &str) -> Option<&'a str> {
    let open = open_tag(block, block.find('<')?)?;
    let bytes = open.as_bytes();
    let mut from = 0;
    while let Some(at) = find_ci(open, attr, from) {
        let preceded_by_space = at > 0 && bytes[at - 1].is_ascii_whitespace();
        let mut cursor = at + attr.len();
        while cursor < open.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        if preceded_by_space && cursor < open.len() && bytes[cursor] == b'=' {
            cursor += 1;
            while cursor < open.len() && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
            }
            if cursor < open.len() && (bytes[cursor] == b'"' || bytes[cursor] == b'\'') {
                let quote = bytes[cursor] as char;
                let value_start = cursor + 1;
                return open[value_start..]
                    .find(quote)
                    .map(|end| &open[value_start..value_start + end]);
            }
            let value_start = cursor;
            while cursor < open.len()
                && !bytes[cursor].is_ascii_whitespace()
                && bytes[cursor] != b'>'
                && bytes[cursor] != b'/'
            {
                cursor += 1;
            }
            return Some(&open[value_start..cursor]);
        }
        from = at + 1;
    }
    None
}

/// True when the element's class list contains `class_name` as a whole
/// token.
pub fn has_class(block: &str, class_name: &str) -> bool {
    attr_value(block, "class")
        .map(|value| {
            value
                .split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case(class_name))
        })
        .unwrap_or(false)
}

/// The full element starting at `start` up to and including its matching
/// close tag, tracking nesting of the same tag name.
fn element_block<'a>(html: &'a str, start: usize, tag: &str) -> Option<&'a str> {
    let open_pattern = format!("<{tag}");
    let close_pattern = format!("</{tag}");
    let mut depth = 0usize;
    let mut cursor = start;
    loop {
        let next_open = next_tag(html, &open_pattern, cursor);
        let next_close = next_tag(html, &close_pattern, cursor);
        match (next_open, next_close) {
            (Some(open_at), Some(close_at)) if open_at < close_at => {
                depth += 1;
                cursor = open_at + open_pattern.len();
            }
            (_, Some(close_at)) => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    let end = html[close_at..].find('>')?;
                    return Some(&html[start..=close_at + end]);
                }
                cursor = close_at + close_pattern.len();
            }
            _ => return None,
        }
    }
}

/// All `<tag ...>` elements whose class list contains `class_name`.
pub fn class_blocks<'a>(html: &'a str, tag: &str, class_name: &str) -> Vec<&'a str> {
    let pattern = format!("<{tag}");
    let mut blocks = Vec::new();
    let mut cursor = 0;
    while let Some(at) = next_tag(html, &pattern, cursor) {
        if let Some(open) = open_tag(html, at) {
            if has_class(open, class_name) {
                if let Some(block) = element_block(html, at, tag) {
                    blocks.push(block);
                }
            }
        }
        cursor = at + 1;
    }
    blocks
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "img" | "br" | "hr" | "input" | "meta" | "link"
    )
}

/// The first element of any tag whose class list contains `class_name`.
pub fn first_block_with_class<'a>(html: &'a str, class_name: &str) -> Option<&'a str> {
    let bytes = html.as_bytes();
    let mut cursor = 0;
    while let Some(at) = html[cursor..].find('<').map(|i| i + cursor) {
        let name_start = at + 1;
        let mut name_end = name_start;
        while name_end < html.len()
            && (bytes[name_end].is_ascii_alphanumeric() || bytes[name_end] == b'-')
        {
            name_end += 1;
        }
        if name_end > name_start {
            let tag = &html[name_start..name_end];
            if let Some(open) = open_tag(html, at) {
                if has_class(open, class_name) {
                    if open.ends_with("/>") || is_void_tag(tag) {
                        return Some(open);
                    }
                    return element_block(html, at, tag).or(Some(open));
                }
            }
        }
        cursor = at + 1;
    }
    None
}

pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Strips tags, decodes the common entities and collapses whitespace.
pub fn inner_text(block: &str) -> String {
    let mut stripped = String::with_capacity(block.len());
    let mut in_tag = false;
    for ch in block.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                stripped.push(' ');
            }
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
