use std::sync::OnceLock;

use regex::Regex;

use super::types::{ActionExtraction, ActionItem, ActionItemError};

fn re_item_split() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\* ").unwrap())
}

fn re_status() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A(.*?)\n\s*Status:(.*)\z").unwrap())
}

fn re_annotation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A(.*?)(?:\[ ([^\]]+) \])?\s*\z").unwrap())
}

fn re_dated_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)\A(.*?)(?: (\d+-\d+-\d+))?$").unwrap())
}

/// Trim a section body and remove its common indentation.
///
/// Leading blank lines and trailing whitespace are dropped first. The indent
/// removed is the smallest leading-space count over the non-blank lines, so
/// nested content keeps its relative indentation.
pub fn dedent(body: &str) -> String {
    let lead = body.len() - body.trim_start().len();
    let start = body[..lead].rfind('\n').map_or(0, |i| i + 1);
    let text = body[start..].trim_end();

    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    let prefix = " ".repeat(indent);
    text.lines()
        .map(|line| line.strip_prefix(prefix.as_str()).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a de-indented action items body into items.
///
/// A malformed item is reported in `errors` and skipped; the rest of the
/// section is still extracted.
pub fn extract(body: &str) -> ActionExtraction {
    let mut extraction = ActionExtraction::default();
    if body.trim().is_empty() {
        return extraction;
    }

    let body = body.strip_prefix("* ").unwrap_or(body);
    for (index, chunk) in re_item_split().split(body).enumerate() {
        if chunk.trim().is_empty() {
            continue;
        }
        match parse_item(chunk) {
            Ok(item) => extraction.items.push(item),
            Err(reason) => {
                log::warn!("Skipping action item {index}: {reason}");
                extraction.errors.push(ActionItemError {
                    index,
                    text: chunk.to_string(),
                    reason,
                });
            }
        }
    }

    extraction
}

/// Parse one action item (without its leading bullet).
pub fn parse_item(text: &str) -> Result<ActionItem, String> {
    let text = text.strip_prefix("* ").unwrap_or(text);

    let (remainder, status) = match re_status().captures(text) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => (text, ""),
    };

    let (lead, annotation) = split_annotation(remainder);
    let mut annotation = annotation.map(str::to_string);
    let mut status = status.trim().to_string();

    // an annotation written after the status line still belongs to the item
    if annotation.is_none() {
        let (status_text, status_annotation) = split_annotation(&status);
        if let Some(label) = status_annotation {
            annotation = Some(label.to_string());
            status = status_text.trim().to_string();
        }
    }

    let (owner, rest) = lead
        .split_once(": ")
        .ok_or_else(|| format!("no 'owner: text' separator in {:?}", first_line(lead)))?;

    let (pmc, date) = match annotation.as_deref() {
        Some(label) => split_date(label),
        None => (None, None),
    };

    Ok(ActionItem {
        owner: owner.trim().to_string(),
        text: rest.trim().to_string(),
        status,
        pmc,
        date,
    })
}

/// Separate a trailing `[ ... ]` annotation from the text before it.
fn split_annotation(text: &str) -> (&str, Option<&str>) {
    match re_annotation().captures(text) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
        ),
        None => (text, None),
    }
}

/// Split `"Label 12-34-56"` into the label and its trailing date token.
fn split_date(label: &str) -> (Option<String>, Option<String>) {
    match re_dated_label().captures(label) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().to_string()),
            caps.get(2).map(|m| m.as_str().to_string()),
        ),
        None => (None, None),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
