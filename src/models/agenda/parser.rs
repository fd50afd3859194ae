use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

use super::actions;
use super::minutes::PriorMinutes;
use super::types::AgendaItem;
use super::window;

const TITLE_PREFIX: &str = "Review Outstanding ";

fn re_reported_section() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Discussion|Action|Business|Announcements").unwrap())
}

fn re_clock() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+):(\d+)([ap]m)?").unwrap())
}

/// Parse the back section (items 8 and up) of an agenda document.
pub fn parse(text: &str, minutes: &dyn PriorMinutes) -> Vec<AgendaItem> {
    window::windows(text)
        .map(|w| build_item(w.attach, w.title, w.body, minutes))
        .collect()
}

fn build_item(attach: &str, title: &str, body: &str, minutes: &dyn PriorMinutes) -> AgendaItem {
    let title = title.strip_prefix(TITLE_PREFIX).unwrap_or(title);

    let mut item = AgendaItem {
        attach: attach.to_string(),
        title: title.to_string(),
        text: body.to_string(),
        prior_reports: None,
        timestamp: None,
        actions: None,
        missing: None,
    };

    if re_reported_section().is_match(title) {
        item.prior_reports = match minutes.lookup(title) {
            Ok(reports) => reports,
            Err(e) => {
                log::warn!("Prior minutes lookup for '{title}' failed: {e}");
                None
            }
        };
    } else if title == "Adjournment" {
        item.timestamp = clock_time(body);
    }

    if title.contains("Action Items") {
        let body = actions::dedent(body);
        item.missing = Some(body.is_empty());
        item.actions = Some(actions::extract(&body).items);
    }

    item
}

/// First `H:MM`, `H:MMam` or `H:MMpm` token in the text.
pub fn clock_time(text: &str) -> Option<NaiveTime> {
    let caps = re_clock().captures(text)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;

    match caps.get(3).map(|m| m.as_str()) {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
