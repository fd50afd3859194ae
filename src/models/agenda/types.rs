use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One numbered item from the back section of the agenda (8 and up).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub attach: String,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_reports: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<bool>,
}

/// An outstanding action item: `* Owner: text [ pmc date ] Status: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub owner: String,
    pub text: String,
    pub status: String,
    pub pmc: Option<String>,
    pub date: Option<String>,
}

/// An action item that could not be split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemError {
    pub index: usize,
    pub text: String,
    pub reason: String,
}

/// Result of extracting the action items of one section.
#[derive(Debug, Clone, Default)]
pub struct ActionExtraction {
    pub items: Vec<ActionItem>,
    pub errors: Vec<ActionItemError>,
}
