//! Merge pending approvals and comments into the agenda text.
//!
//! Three block shapes are recognised. Report attachments:
//!
//! ```text
//!        See Attachment A
//!
//!        [ Accumulo.
//!          approved: sr, jj
//!          comments:
//!          ]
//! ```
//!
//! the minutes approval item (`    A. The meeting of ...`, id `3A`) with the same
//! approved/comments block, and the president's report (`    A. President [...]`,
//! id `4A`) whose block has comments only. Anything else is left alone.
//!
//! Re-applying the same approvals and comments to the output leaves it unchanged.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::reflow::reflow;

/// Right margin of the agenda document.
pub const RIGHT_MARGIN: usize = 79;
/// Indent of lines inside an approved/comments block.
pub const BLOCK_INDENT: usize = 13;

struct Family {
    prefix: &'static str,
    pattern: &'static Regex,
    approvals: bool,
}

fn re_attachment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ms)^\s{7}See\sAttachment\s\s?(\w+)[^\n]*?\s+\[\s[^\n]*\s*approved:\s*?(.*?)\s*comments:(.*?)\n\s{9}\]",
        )
        .unwrap()
    })
}

fn re_minutes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ms)^\s{4}(\w)\.\sThe\smeeting\sof.*?\[\s[^\n]*\s*approved:\s*?(.*?)\s*comments:(.*?)\n\s{9}\]",
        )
        .unwrap()
    })
}

fn re_president() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?ms)^\s{4}(\w)\.\sPresident\s\[.*?\[\s*comments:()(.*?)\n\s{9}\]").unwrap()
    })
}

fn re_list_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*|\s+").unwrap())
}

fn re_empty_approval() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"approved:([ \t]*)\n").unwrap())
}

fn re_block_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s{9}\]").unwrap())
}

fn families() -> [Family; 3] {
    [
        Family { prefix: "", pattern: re_attachment(), approvals: true },
        Family { prefix: "3", pattern: re_minutes(), approvals: true },
        Family { prefix: "4", pattern: re_president(), approvals: false },
    ]
}

/// Apply `approved` attachments and `comments` on behalf of `initials`.
pub fn apply(
    agenda: &str,
    approved: &BTreeSet<String>,
    comments: &BTreeMap<String, String>,
    initials: &str,
) -> String {
    let mut agenda = agenda.to_string();

    for family in families() {
        let patched = family.pattern.replace_all(&agenda, |caps: &Captures| {
            let mut block = caps[0].to_string();
            let attachment = format!("{}{}", family.prefix, &caps[1]);

            if family.approvals && approved.contains(&attachment) {
                block = approve(&block, caps.get(2).map_or("", |m| m.as_str()), initials);
            }

            if let Some(comment) = comments.get(&attachment) {
                block = add_comment(&block, comment, initials);
            }

            block
        });
        agenda = patched.into_owned();
    }

    agenda
}

/// Add `initials` to the block's `approved:` list unless already present.
fn approve(block: &str, approvals: &str, initials: &str) -> String {
    let existing: Vec<&str> = re_list_separator()
        .split(approvals.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if existing.contains(&initials) {
        return block.to_string();
    }

    let mut block = block.to_string();
    if existing.is_empty() {
        let spaces = re_empty_approval()
            .captures(&block)
            .and_then(|c| c.get(1))
            .map(|m| m.range());
        if let Some(range) = spaces {
            block.replace_range(range, &format!(" {initials}"));
        }
    } else if let Some(start) = block.find("approved:") {
        let end = block[start..].find('\n').map_or(block.len(), |i| start + i);
        block.insert_str(end, &format!(", {initials}"));
    }
    block
}

/// Insert the reflowed comment, tagged with `initials`, before the closing `]`.
fn add_comment(block: &str, comment: &str, initials: &str) -> String {
    let text = render_comment(comment, initials);
    if text.is_empty() || block.contains(&format!("\n{text}\n")) {
        return block.to_string();
    }

    let mut block = block.to_string();
    let close = re_block_close().find(&block).map(|m| m.start() + 1);
    if let Some(at) = close {
        block.insert_str(at, &format!("{text}\n"));
    }
    block
}

/// Reflow a comment into block layout with `"INITIALS: "` on its first line.
pub fn render_comment(comment: &str, initials: &str) -> String {
    let width = RIGHT_MARGIN
        .saturating_sub(BLOCK_INDENT)
        .saturating_sub(initials.len());
    let mut text = reflow(comment, BLOCK_INDENT + initials.len(), width);

    let lead = text.len() - text.trim_start_matches(' ').len();
    let tag = initials.len() + 2;
    if lead >= tag {
        text.replace_range(lead - tag..lead, &format!("{initials}: "));
    }
    text
}
