//! Streaming extraction of icon references from HTML markup.
//!
//! A single-pass scanner over start tags — no DOM, no entity decoding, no
//! tree construction. The only thing of interest is `<link>` tags whose
//! `rel` value contains "icon" (`icon`, `shortcut icon`,
//! `apple-touch-icon`, ...), and those live in `<head>`, so the scan is
//! capped at a fixed prefix of the document. Malformed markup never
//! fails; the worst case is an empty result.

/// Scan at most this many bytes of markup. Icon links live in `<head>`,
/// and walking an entire multi-megabyte document is wasted work.
pub const SCAN_LIMIT: usize = 150_000;

/// Extract raw (possibly relative) icon href values in document order.
///
/// A `<link>` qualifies when its `rel` attribute, lower-cased, contains
/// the substring `icon` and a non-empty `href` is present. No
/// deduplication happens here; the resolver dedups after resolving
/// candidates to absolute URLs.
#[must_use]
pub fn extract_icon_hrefs(html: &str) -> Vec<String> {
    let input = truncate_at_char_boundary(html, SCAN_LIMIT);
    let bytes = input.as_bytes();
    let mut hrefs = Vec::new();
    let mut idx = 0_usize;

    while idx < bytes.len() {
        if bytes[idx] != b'<' {
            idx += 1;
            continue;
        }
        if input[idx..].starts_with("<!--") {
            idx = skip_comment(bytes, idx);
            continue;
        }
        if matches!(bytes.get(idx + 1), Some(b'!' | b'/' | b'?')) {
            idx = skip_to_gt(bytes, idx + 2);
            continue;
        }
        let Some(tag) = parse_start_tag(input, idx) else {
            idx += 1;
            continue;
        };

        if tag.name.eq_ignore_ascii_case("link") {
            let rel = tag.attr("rel").unwrap_or("").to_ascii_lowercase();
            if rel.contains("icon") {
                if let Some(href) = tag.attr("href") {
                    if !href.is_empty() {
                        hrefs.push(href.to_owned());
                    }
                }
            }
        }
        idx = tag.end;
    }

    hrefs
}

/// A parsed start tag: name, attributes, and the index just past `>`.
struct StartTag<'a> {
    name: &'a str,
    /// Attribute names lower-cased; values raw. Duplicate names keep the
    /// last occurrence, matching how browsers coalesce attributes.
    attrs: Vec<(String, &'a str)>,
    end: usize,
}

impl<'a> StartTag<'a> {
    fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .rev()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| *v)
    }
}

fn parse_start_tag(input: &str, start: usize) -> Option<StartTag<'_>> {
    let bytes = input.as_bytes();
    let mut idx = start + 1;

    let name_start = idx;
    while idx < bytes.len() && is_name_byte(bytes[idx]) {
        idx += 1;
    }
    if idx == name_start {
        return None;
    }
    let name = &input[name_start..idx];

    let mut attrs = Vec::new();
    loop {
        idx = skip_whitespace(bytes, idx);
        match bytes.get(idx) {
            // Unterminated tag at end of (possibly truncated) input:
            // keep whatever attributes were seen.
            None => return Some(StartTag { name, attrs, end: idx }),
            Some(b'>') => {
                return Some(StartTag {
                    name,
                    attrs,
                    end: idx + 1,
                });
            }
            // Self-closing slash (or stray slash) — skip it.
            Some(b'/') => idx += 1,
            Some(_) => {
                let (attr, next) = parse_attribute(input, idx);
                if let Some(pair) = attr {
                    attrs.push(pair);
                }
                // Guarantee forward progress on pathological input.
                idx = next.max(idx + 1);
            }
        }
    }
}

fn parse_attribute(input: &str, start: usize) -> (Option<(String, &str)>, usize) {
    let bytes = input.as_bytes();
    let mut idx = start;

    let name_start = idx;
    while idx < bytes.len()
        && !bytes[idx].is_ascii_whitespace()
        && !matches!(bytes[idx], b'=' | b'>' | b'/')
    {
        idx += 1;
    }
    if idx == name_start {
        return (None, idx + 1);
    }
    let name = input[name_start..idx].to_ascii_lowercase();

    idx = skip_whitespace(bytes, idx);
    if bytes.get(idx) != Some(&b'=') {
        // Valueless attribute, e.g. `<link rel href=...>`.
        return (Some((name, "")), idx);
    }
    idx = skip_whitespace(bytes, idx + 1);

    match bytes.get(idx) {
        Some(&quote @ (b'"' | b'\'')) => {
            let value_start = idx + 1;
            let mut end = value_start;
            while end < bytes.len() && bytes[end] != quote {
                end += 1;
            }
            let value = &input[value_start..end];
            (Some((name, value)), (end + 1).min(bytes.len()))
        }
        _ => {
            let value_start = idx;
            while idx < bytes.len() && !bytes[idx].is_ascii_whitespace() && bytes[idx] != b'>' {
                idx += 1;
            }
            (Some((name, &input[value_start..idx])), idx)
        }
    }
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b':'
}

fn skip_whitespace(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}

fn skip_to_gt(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx] != b'>' {
        idx += 1;
    }
    (idx + 1).min(bytes.len())
}

fn skip_comment(bytes: &[u8], start: usize) -> usize {
    let mut idx = start + 4;
    while idx + 2 < bytes.len() {
        if &bytes[idx..idx + 3] == b"-->" {
            return idx + 3;
        }
        idx += 1;
    }
    bytes.len()
}

fn truncate_at_char_boundary(input: &str, max: usize) -> &str {
    if input.len() <= max {
        return input;
    }
    let mut end = max;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}
