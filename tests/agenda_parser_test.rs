//! Agenda parser tests: item boundaries, titles, section classification and
//! action item extraction.

mod common;

use chrono::NaiveTime;

use board_agenda::models::agenda::actions::{dedent, extract};
use board_agenda::models::agenda::{MinutesArchive, NoMinutes, PriorMinutes, parse};
use board_agenda::errors::AppError;
use common::*;

struct BrokenMinutes;

impl PriorMinutes for BrokenMinutes {
    fn lookup(&self, _title: &str) -> Result<Option<String>, AppError> {
        Err(AppError::Lookup("minutes archive offline".to_string()))
    }
}

#[test]
fn test_boundary_scan_stops_at_delimiter() {
    let text = " 8. Discussion Items\n\n    A. one\n\n 9. Announcements\n\n    two\n\n\
                10. Unfinished Business\n\n    three\n\n11. New Business\n\n    four\n\n\
                ===\nATTACHMENTS\n\n    A. not an item\n";
    let items = parse(text, &NoMinutes);

    assert_eq!(items.len(), 4);
    let attach: Vec<&str> = items.iter().map(|i| i.attach.as_str()).collect();
    assert_eq!(attach, ["8", "9", "10", "11"]);
    assert_eq!(items[0].text, "\n    A. one\n");
    assert_eq!(items[2].text, "\n    three\n");
    assert_eq!(items[3].text, "\n    four\n");
    assert!(items.iter().all(|i| !i.text.contains("===")));
}

#[test]
fn test_full_agenda() {
    let items = parse(AGENDA, &NoMinutes);
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Discussion Items",
            "Action Items",
            "Unfinished Business",
            "New Business",
            "Announcements",
            "Adjournment",
        ]
    );

    let adjournment = &items[5];
    assert_eq!(adjournment.attach, "13");
    assert_eq!(adjournment.timestamp, NaiveTime::from_hms_opt(11, 30, 0));
    assert_eq!(adjournment.actions, None);
}

#[test]
fn test_title_normalization() {
    let items = parse("10. Review Outstanding Action Items\n\n===\n", &NoMinutes);
    assert_eq!(items[0].title, "Action Items");
}

#[test]
fn test_action_items_from_agenda() {
    let items = parse(AGENDA, &NoMinutes);
    let section = &items[1];
    assert_eq!(section.missing, Some(false));

    let actions = section.actions.as_ref().expect("actions");
    assert_eq!(actions.len(), 2);

    assert_eq!(actions[0].owner, "Sam");
    assert_eq!(actions[0].text, "Follow up with Accumulo about the late report");
    assert_eq!(actions[0].pmc.as_deref(), Some("Accumulo"));
    assert_eq!(actions[0].date.as_deref(), Some("2024-01-17"));
    assert_eq!(actions[0].status, "");

    assert_eq!(actions[1].owner, "Rich");
    assert_eq!(actions[1].pmc.as_deref(), Some("Legal"));
    assert_eq!(actions[1].date, None);
    assert_eq!(actions[1].status, "In progress");
}

#[test]
fn test_action_item_field_extraction() {
    let extraction = extract("* Alice: fix the widget\n  Status: done [ infra 01-02-03 ]");
    assert!(extraction.errors.is_empty());
    assert_eq!(extraction.items.len(), 1);

    let item = &extraction.items[0];
    assert_eq!(item.owner, "Alice");
    assert_eq!(item.text, "fix the widget");
    assert_eq!(item.status, "done");
    assert_eq!(item.pmc.as_deref(), Some("infra"));
    assert_eq!(item.date.as_deref(), Some("01-02-03"));
}

#[test]
fn test_dedent_keeps_relative_indentation() {
    let body = "\n    * Ann: one\n      [ Foo ]\n        Status: nested\n";
    assert_eq!(dedent(body), "* Ann: one\n  [ Foo ]\n    Status: nested");

    let items = parse(&format!(" 9. Action Items\n{body}\n===\n"), &NoMinutes);
    let actions = items[0].actions.as_ref().expect("actions");
    assert_eq!(actions[0].owner, "Ann");
    assert_eq!(actions[0].pmc.as_deref(), Some("Foo"));
    assert_eq!(actions[0].status, "nested");
}

#[test]
fn test_missing_action_items() {
    for body in ["", "\n", "\n    \n  \n"] {
        let items = parse(&format!(" 9. Review Outstanding Action Items\n{body}\n===\n"), &NoMinutes);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].missing, Some(true));
        assert_eq!(items[0].actions.as_ref().map(Vec::len), Some(0));
    }
}

#[test]
fn test_malformed_action_item_is_skipped() {
    let text = " 9. Action Items\n\n    * Ann: one\n\n    * no separator here\n\n    * Bob: three\n\n===\n";
    let items = parse(text, &NoMinutes);
    let owners: Vec<&str> = items[0]
        .actions
        .as_ref()
        .expect("actions")
        .iter()
        .map(|a| a.owner.as_str())
        .collect();
    assert_eq!(owners, ["Ann", "Bob"]);
}

#[test]
fn test_prior_reports_lookup() {
    let archive = MinutesArchive::new("https://example.org/minutes");
    let items = parse(AGENDA, &archive);

    assert_eq!(
        items[0].prior_reports.as_deref(),
        Some("https://example.org/minutes/Discussion_Items")
    );
    assert!(items[1].prior_reports.is_some());
    assert!(items[4].prior_reports.is_some());
    assert_eq!(items[5].prior_reports, None);
}

#[test]
fn test_failed_lookup_does_not_block_parse() {
    let items = parse(AGENDA, &BrokenMinutes);
    assert_eq!(items.len(), 6);
    assert!(items.iter().all(|i| i.prior_reports.is_none()));
    assert_eq!(items[1].actions.as_ref().map(Vec::len), Some(2));
}

#[test]
fn test_adjournment_without_time() {
    let items = parse("13. Adjournment\n\n    Whenever we are done.\n\n===\n", &NoMinutes);
    assert_eq!(items[0].timestamp, None);
}
