//! The series registry and its merge algorithm.

use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use conflux_core::{Category, ConferenceSeries};

use crate::error::StoreError;

/// Compound registry key. A series is uniquely identified by its
/// normalized name together with its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub name: String,
    pub category: Category,
}

/// Mutable registry of conference series, the single source of truth for
/// a run.
///
/// Created once at startup, filled by the source adapters, serialized once
/// at the end. Not designed for concurrent mutation: `add_or_merge_series`
/// is a multi-step read-check-apply sequence and `&mut self` is its
/// exclusivity guarantee.
#[derive(Debug, Default)]
pub struct ConferenceStore {
    series: HashMap<SeriesKey, ConferenceSeries>,
}

impl ConferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Look up series by name, category, or both.
    ///
    /// - Name only: at most one hit per category, in [`Category::ALL`]
    ///   enumeration order. Short names (`FSE`) can legitimately resolve to
    ///   several series; callers must disambiguate.
    /// - Category only: every series in that category, order unspecified.
    /// - Both: zero or one hit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuery`] if both criteria are omitted.
    pub fn find_series(
        &self,
        name: Option<&str>,
        category: Option<Category>,
    ) -> Result<Vec<&ConferenceSeries>, StoreError> {
        match (name, category) {
            (None, None) => Err(StoreError::InvalidQuery),
            (None, Some(category)) => Ok(self
                .series
                .iter()
                .filter(|(key, _)| key.category == category)
                .map(|(_, series)| series)
                .collect()),
            (Some(name), None) => Ok(Category::ALL
                .iter()
                .filter_map(|&category| {
                    self.series.get(&SeriesKey {
                        name: name.to_string(),
                        category,
                    })
                })
                .collect()),
            (Some(name), Some(category)) => Ok(self
                .series
                .get(&SeriesKey {
                    name: name.to_string(),
                    category,
                })
                .into_iter()
                .collect()),
        }
    }

    /// Insert a series, or merge it into the existing record with the same
    /// `(name, category)` key.
    ///
    /// The merge is all-or-nothing: any hard conflict (description
    /// mismatch, ranking disagreement, conference identity mismatch) is
    /// logged at `error` and abandons the entire merge, leaving the
    /// existing record untouched. Differing acceptance statistics are a
    /// soft conflict: logged at `warn`, merged best-effort with incoming
    /// values winning. Idempotent on identical repeated input.
    ///
    /// Takes ownership of `incoming`; the store never aliases caller-held
    /// data.
    pub fn add_or_merge_series(&mut self, incoming: ConferenceSeries) {
        let key = SeriesKey {
            name: incoming.name.clone(),
            category: incoming.category,
        };
        match self.series.entry(key) {
            hash_map::Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            hash_map::Entry::Occupied(slot) => merge_into(slot.into_mut(), incoming),
        }
    }

    /// Serialize the registry as the output artifact: a JSON object keyed
    /// by `"{name}__CAT{category}"` with the category's variant name, in
    /// deterministic key order.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if encoding fails.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        let keyed: BTreeMap<String, &ConferenceSeries> = self
            .series
            .iter()
            .map(|(key, series)| {
                (
                    format!("{}__CAT{}", key.name, key.category.key_name()),
                    series,
                )
            })
            .collect();
        serde_json::to_string(&keyed)
    }
}

/// Merge `incoming` into the existing record sharing its key.
fn merge_into(existing: &mut ConferenceSeries, incoming: ConferenceSeries) {
    // Conflict gate. Identity-defining fields that disagree mean the two
    // records probably describe different things accidentally sharing a
    // key; rejecting wholesale avoids corrupting one field while
    // accepting another.
    if existing.description != incoming.description {
        tracing::error!(
            name = %incoming.name,
            category = %incoming.category,
            "description of two series to merge does not match; merge abandoned"
        );
        return;
    }
    if existing
        .rankings
        .iter()
        .any(|(org, rank)| incoming.rankings.get(org).is_some_and(|r| r != rank))
    {
        tracing::error!(
            name = %incoming.name,
            category = %incoming.category,
            "rankings of two series to merge do not match; merge abandoned"
        );
        return;
    }
    if existing.conferences.iter().any(|(year, conference)| {
        incoming
            .conferences
            .get(year)
            .is_some_and(|c| !conference.is_mergeable_with(c))
    }) {
        tracing::error!(
            name = %incoming.name,
            category = %incoming.category,
            "conferences of two series to merge do not match; merge abandoned"
        );
        return;
    }
    if existing.acceptance_statistics.iter().any(|(year, stats)| {
        incoming
            .acceptance_statistics
            .get(year)
            .is_some_and(|s| s != stats)
    }) {
        tracing::warn!(
            name = %incoming.name,
            category = %incoming.category,
            "acceptance statistics of two series to merge do not match; \
             merging best-effort, incoming values win"
        );
    }

    // Apply. Ranking overwrites can only hit identical values or new keys
    // (checked above); statistics overwrites are the best-effort policy.
    existing.rankings.extend(incoming.rankings);
    existing
        .acceptance_statistics
        .extend(incoming.acceptance_statistics);

    for (year, conference) in incoming.conferences {
        match existing.conferences.entry(year) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(conference);
            }
            btree_map::Entry::Occupied(mut slot) => {
                // Link and location are identical (checked above), so only
                // the timelines need reconciling: set union, existing
                // order preserved, new events appended.
                let timeline = &mut slot.get_mut().timeline;
                for event in conference.timeline {
                    if !timeline.contains(&event) {
                        timeline.push(event);
                    }
                }
            }
        }
    }
}
