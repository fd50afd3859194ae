use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One member's not-yet-committed approvals and comments.
///
/// Keys other than the ones below are carried through load/store untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    #[serde(default)]
    pub agenda: String,
    #[serde(default)]
    pub approved: BTreeSet<String>,
    #[serde(default)]
    pub comments: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

impl Pending {
    pub fn is_empty(&self) -> bool {
        self.approved.is_empty() && self.comments.is_empty()
    }

    /// Forget approvals and comments once they are committed.
    pub fn clear(&mut self) {
        self.approved.clear();
        self.comments.clear();
    }
}
