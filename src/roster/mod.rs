//! Recipient roster: the input document naming who receives the message.
//!
//! A roster has two top-level fields: `universals` (people appended to every
//! group) and `groups` (either a scalar phone number or a map of member
//! names to numbers). Numbers stay raw strings at parse time and are checked
//! against the configured [`PhoneFormat`](crate::domain::PhoneFormat) when
//! the roster is resolved, so the format policy remains a run-time
//! configuration choice.

mod resolver;
pub use resolver::{resolve, ResolvedGroup};

use crate::error::RosterResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One entry under `groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupEntry {
    /// Scalar shorthand: a single number forms a one-member group.
    Single(String),

    /// Named members; the display names exist only for authoring and are
    /// discarded during resolution.
    Members(BTreeMap<String, String>),
}

/// Top-level recipient document.
///
/// Any field the schema does not know is rejected, as is any value of the
/// wrong shape; a roster either loads completely or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Roster {
    /// Display-name to phone number; appended to every group. May be empty.
    #[serde(default)]
    pub universals: BTreeMap<String, String>,

    /// Group name to a scalar number or a member map.
    #[serde(default)]
    pub groups: BTreeMap<String, GroupEntry>,
}

impl Roster {
    /// Parse a roster from JSON text.
    pub fn from_json(text: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a roster from a JSON file.
    pub fn load(path: &Path) -> RosterResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// An example document, shown by `--print-example`.
    pub fn example() -> Self {
        let mut universals = BTreeMap::new();
        universals.insert("Business Partner".to_string(), "5555555555".to_string());

        let mut team1 = BTreeMap::new();
        team1.insert("John".to_string(), "5555555551".to_string());
        team1.insert("Paul".to_string(), "5555555552".to_string());
        team1.insert("George".to_string(), "5555555553".to_string());
        team1.insert("Ringo".to_string(), "5555555554".to_string());

        let mut team2 = BTreeMap::new();
        team2.insert("Roland O".to_string(), "5555555556".to_string());
        team2.insert("Curt S".to_string(), "5555555557".to_string());

        let mut groups = BTreeMap::new();
        groups.insert("Team 1".to_string(), GroupEntry::Members(team1));
        groups.insert("Team 2".to_string(), GroupEntry::Members(team2));
        groups.insert(
            "Adam Y".to_string(),
            GroupEntry::Single("5555555558".to_string()),
        );

        Roster { universals, groups }
    }

    /// The example document as pretty-printed JSON.
    pub fn example_json() -> String {
        serde_json::to_string_pretty(&Self::example()).expect("example roster serializes")
    }
}
