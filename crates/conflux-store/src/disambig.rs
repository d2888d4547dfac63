//! Candidate ranking for name-only series matches.
//!
//! Enrichment sources often supply nothing but a short series name
//! (`"FSE"`), which can resolve to several series in different categories.
//! The heuristic here picks the most prominent candidate: higher CORE
//! ranking first, more recorded conference years on a tie. Wrong matches
//! are possible; this is accepted as a known limitation, since upstream
//! data offers nothing further to disambiguate on.

use conflux_core::ConferenceSeries;

/// Numeric tier for a series' `"core"` ranking entry.
///
/// `A* → 4, A → 3, B → 2, C → 1, N → 0`; a missing or unrecognized entry
/// maps to 0.
#[must_use]
pub fn core_ranking_tier(series: &ConferenceSeries) -> u8 {
    match series.rankings.get("core").map(String::as_str) {
        Some("A*") => 4,
        Some("A") => 3,
        Some("B") => 2,
        Some("C") => 1,
        _ => 0,
    }
}

/// Pick the best candidate among several series sharing a name.
///
/// Ranks descending by `(core ranking tier, recorded conference years)`.
/// On a full tie the first candidate wins, so callers passing candidates
/// in category enumeration order get a deterministic result.
#[must_use]
pub fn select_best_candidate<'a>(candidates: &[&'a ConferenceSeries]) -> Option<&'a ConferenceSeries> {
    candidates.iter().copied().reduce(|best, candidate| {
        let best_key = (core_ranking_tier(best), best.conferences.len());
        let candidate_key = (core_ranking_tier(candidate), candidate.conferences.len());
        if candidate_key > best_key { candidate } else { best }
    })
}
