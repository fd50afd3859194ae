use std::sync::OnceLock;

use regex::Regex;

fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^( [89]|1\d)\. ([^\n]*)\n").unwrap())
}

// a top-level marker or `===`; lists indented two or more spaces never match
fn re_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n(?:[\s1]\d\.|===)").unwrap())
}

/// One heading plus the body it owns, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub attach: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    /// Byte offset where the body stops; scanning resumes here.
    pub end: usize,
}

/// Find the next item window at or after `from`.
pub fn next_window(text: &str, from: usize) -> Option<Window<'_>> {
    let caps = re_heading().captures_at(text, from)?;
    let whole = caps.get(0)?;
    let body_start = whole.end();

    // without a closing boundary the body runs to the end of the document
    let end = next_boundary(text, body_start).unwrap_or(text.len());

    Some(Window {
        attach: caps.get(1)?.as_str().trim(),
        title: caps.get(2)?.as_str(),
        body: &text[body_start..end],
        end,
    })
}

/// Offset of the newline that starts the next boundary line after `from`.
pub fn next_boundary(text: &str, from: usize) -> Option<usize> {
    re_boundary().find_at(text, from).map(|m| m.start())
}

/// Iterate over every item window in document order.
pub fn windows(text: &str) -> impl Iterator<Item = Window<'_>> {
    let mut pos = 0;
    std::iter::from_fn(move || {
        let window = next_window(text, pos)?;
        pos = window.end;
        Some(window)
    })
}
