//! Resolution of a roster into ordered, deduplicated per-group send lists.

use super::{GroupEntry, Roster};
use crate::domain::{PhoneFormat, PhoneNumber};
use crate::error::{RosterError, RosterResult};
use std::collections::BTreeSet;

/// One group ready to dispatch: its name and the deduplicated, sorted union
/// of the group's own numbers and the universal numbers.
///
/// Produced once per resolution and immutable afterwards; the dispatcher
/// borrows it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    name: String,
    numbers: Vec<PhoneNumber>,
}

impl ResolvedGroup {
    /// The group's name as authored in the roster.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The recipients, deduplicated and lexicographically sorted.
    pub fn numbers(&self) -> &[PhoneNumber] {
        &self.numbers
    }

    /// Comma-separated rendering used by the console report.
    pub fn numbers_joined(&self) -> String {
        self.numbers
            .iter()
            .map(PhoneNumber::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_number(value: &str, format: PhoneFormat, location: String) -> RosterResult<PhoneNumber> {
    PhoneNumber::parse(value, format)
        .map_err(|source| RosterError::InvalidPhone { location, source })
}

/// Resolve a roster against the active phone-number format.
///
/// Every group receives the universal numbers in addition to its own. Both
/// the numbers within a group and the groups themselves come out
/// lexicographically sorted, so the result is identical for any authoring
/// order of the input document, and resolving the same roster twice yields
/// the same output.
///
/// # Errors
///
/// Fails on the first phone number that does not match `format`, naming the
/// offending entry's location in the document. No partial output is
/// produced, and no network activity has happened yet.
pub fn resolve(roster: &Roster, format: PhoneFormat) -> RosterResult<Vec<ResolvedGroup>> {
    let mut universals = BTreeSet::new();
    for (name, value) in &roster.universals {
        universals.insert(parse_number(
            value,
            format,
            format!("universals.{}", name),
        )?);
    }

    let mut resolved = Vec::with_capacity(roster.groups.len());
    for (group_name, entry) in &roster.groups {
        let mut numbers = universals.clone();
        match entry {
            GroupEntry::Single(value) => {
                numbers.insert(parse_number(value, format, format!("groups.{}", group_name))?);
            }
            GroupEntry::Members(members) => {
                for (member_name, value) in members {
                    numbers.insert(parse_number(
                        value,
                        format,
                        format!("groups.{}.{}", group_name, member_name),
                    )?);
                }
            }
        }
        // BTreeMap iteration keeps groups sorted by name; BTreeSet keeps the
        // numbers sorted and unique.
        resolved.push(ResolvedGroup {
            name: group_name.clone(),
            numbers: numbers.into_iter().collect(),
        });
    }

    Ok(resolved)
}
