//! Value types for conference series records.
//!
//! Equality is structural throughout; the merge algorithm in
//! `conflux-store` relies on it to deduplicate timeline events and to
//! detect conflicting statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Category;

/// Paper acceptance numbers for one series in one year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AcceptanceStatistics {
    pub accepted: u32,
    pub submitted: u32,
}

/// One point in a conference's timeline: a deadline, a notification date,
/// or the conference itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Event {
    pub date: DateTime<FixedOffset>,
    pub description: String,
}

/// One edition of a series in one year.
///
/// Timeline order is insertion order, not guaranteed chronological.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Conference {
    pub link: String,
    pub location: String,
    pub timeline: Vec<Event>,
}

impl Conference {
    /// Whether two records for the same (series, year) describe the same
    /// edition. Timelines can always be reconciled and never block.
    #[must_use]
    pub fn is_mergeable_with(&self, other: &Self) -> bool {
        self.link == other.link && self.location == other.location
    }
}

/// A recurring named conference spanning many years. The aggregation root
/// of the data model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConferenceSeries {
    pub name: String,
    pub category: Category,
    pub description: String,
    /// Ranking organization (e.g. `core`, `ccf`) to rank string (`A*`, `B`).
    pub rankings: BTreeMap<String, String>,
    /// Year to that year's edition.
    pub conferences: BTreeMap<i32, Conference>,
    /// Year to that year's acceptance numbers.
    pub acceptance_statistics: BTreeMap<i32, AcceptanceStatistics>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(rfc3339: &str, description: &str) -> Event {
        Event {
            date: DateTime::parse_from_rfc3339(rfc3339).unwrap(),
            description: description.to_string(),
        }
    }

    #[test]
    fn event_equality_is_structural() {
        let a = event("2024-05-01T23:59:59-12:00", "Paper deadline");
        let b = event("2024-05-01T23:59:59-12:00", "Paper deadline");
        let c = event("2024-05-01T23:59:59-12:00", "Abstract deadline");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn mergeable_requires_identical_link_and_location() {
        let base = Conference {
            link: "https://example.org/2024".to_string(),
            location: "Vienna, Austria".to_string(),
            timeline: vec![],
        };
        let same_identity = Conference {
            timeline: vec![event("2024-06-10T00:00:00+00:00", "Conference start")],
            ..base.clone()
        };
        let moved = Conference {
            location: "Lisbon, Portugal".to_string(),
            ..base.clone()
        };
        assert!(base.is_mergeable_with(&same_identity));
        assert!(!base.is_mergeable_with(&moved));
    }
}
