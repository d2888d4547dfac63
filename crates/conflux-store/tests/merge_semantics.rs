//! End-to-end merge semantics: all-or-nothing hard conflicts, best-effort
//! statistics, and the enrichment flow that clones a disambiguated
//! candidate before attaching data.

use std::collections::BTreeMap;

use chrono::DateTime;
use conflux_core::{AcceptanceStatistics, Category, Conference, ConferenceSeries, Event};
use conflux_store::{ConferenceStore, normalize_series_name, select_best_candidate};
use pretty_assertions::assert_eq;

fn event(rfc3339: &str, description: &str) -> Event {
    Event {
        date: DateTime::parse_from_rfc3339(rfc3339).unwrap(),
        description: description.to_string(),
    }
}

fn base_series(name: &str, category: Category, description: &str) -> ConferenceSeries {
    ConferenceSeries {
        name: name.to_string(),
        category,
        description: description.to_string(),
        rankings: BTreeMap::new(),
        conferences: BTreeMap::new(),
        acceptance_statistics: BTreeMap::new(),
    }
}

#[test]
fn hard_conflict_abandons_the_entire_merge() {
    let mut store = ConferenceStore::new();

    let mut existing = base_series("NDSS", Category::Security, "A");
    existing
        .rankings
        .insert("core".to_string(), "A*".to_string());
    store.add_or_merge_series(existing);

    // Same key, different description, plus otherwise-acceptable new data
    // that must not be applied.
    let mut incoming = base_series("NDSS", Category::Security, "B");
    incoming.rankings.insert("ccf".to_string(), "A".to_string());
    incoming.acceptance_statistics.insert(
        2024,
        AcceptanceStatistics {
            accepted: 100,
            submitted: 600,
        },
    );
    store.add_or_merge_series(incoming);

    let hits = store
        .find_series(Some("NDSS"), Some(Category::Security))
        .unwrap();
    assert_eq!(hits[0].description, "A");
    assert!(!hits[0].rankings.contains_key("ccf"));
    assert!(hits[0].acceptance_statistics.is_empty());
}

#[test]
fn ranking_disagreement_is_a_hard_conflict() {
    let mut store = ConferenceStore::new();

    let mut existing = base_series("CCS", Category::Security, "desc");
    existing.rankings.insert("core".to_string(), "A".to_string());
    store.add_or_merge_series(existing);

    let mut incoming = base_series("CCS", Category::Security, "desc");
    incoming
        .rankings
        .insert("core".to_string(), "A*".to_string());
    incoming.rankings.insert("ccf".to_string(), "A".to_string());
    store.add_or_merge_series(incoming);

    let hits = store
        .find_series(Some("CCS"), Some(Category::Security))
        .unwrap();
    assert_eq!(hits[0].rankings["core"], "A");
    assert!(!hits[0].rankings.contains_key("ccf"));
}

#[test]
fn one_sided_rankings_merge_cleanly() {
    let mut store = ConferenceStore::new();

    let mut existing = base_series("CCS", Category::Security, "desc");
    existing.rankings.insert("core".to_string(), "A".to_string());
    store.add_or_merge_series(existing);

    let mut incoming = base_series("CCS", Category::Security, "desc");
    incoming.rankings.insert("ccf".to_string(), "A".to_string());
    store.add_or_merge_series(incoming);

    let hits = store
        .find_series(Some("CCS"), Some(Category::Security))
        .unwrap();
    assert_eq!(hits[0].rankings["core"], "A");
    assert_eq!(hits[0].rankings["ccf"], "A");
}

#[test]
fn conference_identity_mismatch_blocks_but_timelines_never_do() {
    let mut store = ConferenceStore::new();

    let mut existing = base_series("VLDB", Category::Databases, "desc");
    existing.conferences.insert(
        2024,
        Conference {
            link: "https://vldb.org/2024".to_string(),
            location: "Guangzhou, China".to_string(),
            timeline: vec![event("2024-03-01T23:59:59-12:00", "Paper")],
        },
    );
    store.add_or_merge_series(existing);

    // Different location for the same year: hard conflict, new year 2025
    // must not be applied either.
    let mut moved = base_series("VLDB", Category::Databases, "desc");
    moved.conferences.insert(
        2024,
        Conference {
            link: "https://vldb.org/2024".to_string(),
            location: "London, UK".to_string(),
            timeline: vec![],
        },
    );
    moved.conferences.insert(
        2025,
        Conference {
            link: "https://vldb.org/2025".to_string(),
            location: "London, UK".to_string(),
            timeline: vec![],
        },
    );
    store.add_or_merge_series(moved);

    let hits = store
        .find_series(Some("VLDB"), Some(Category::Databases))
        .unwrap();
    assert_eq!(hits[0].conferences.len(), 1);
    assert_eq!(hits[0].conferences[&2024].location, "Guangzhou, China");

    // Identical identity with a different timeline merges fine.
    let mut enriched = base_series("VLDB", Category::Databases, "desc");
    enriched.conferences.insert(
        2024,
        Conference {
            link: "https://vldb.org/2024".to_string(),
            location: "Guangzhou, China".to_string(),
            timeline: vec![event("2024-08-26T00:00:00+00:00", "Conference start")],
        },
    );
    store.add_or_merge_series(enriched);

    let hits = store
        .find_series(Some("VLDB"), Some(Category::Databases))
        .unwrap();
    let timeline = &hits[0].conferences[&2024].timeline;
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].description, "Paper");
    assert_eq!(timeline[1].description, "Conference start");
}

#[test]
fn soft_conflict_lets_incoming_statistics_win() {
    let mut store = ConferenceStore::new();

    let mut existing = base_series("FSE", Category::Engineering, "desc");
    existing.acceptance_statistics.insert(
        2020,
        AcceptanceStatistics {
            accepted: 10,
            submitted: 50,
        },
    );
    store.add_or_merge_series(existing);

    let mut incoming = base_series("FSE", Category::Engineering, "desc");
    incoming.acceptance_statistics.insert(
        2020,
        AcceptanceStatistics {
            accepted: 12,
            submitted: 55,
        },
    );
    store.add_or_merge_series(incoming);

    let hits = store
        .find_series(Some("FSE"), Some(Category::Engineering))
        .unwrap();
    assert_eq!(
        hits[0].acceptance_statistics[&2020],
        AcceptanceStatistics {
            accepted: 12,
            submitted: 55,
        }
    );
}

#[test]
fn enrichment_flow_clone_then_merge_has_no_side_effect_on_rejection() {
    let mut store = ConferenceStore::new();

    let mut tier_a = base_series("FSE", Category::Security, "crypto fse");
    tier_a.rankings.insert("core".to_string(), "A".to_string());
    for year in [2022, 2023, 2024] {
        tier_a.conferences.insert(
            year,
            Conference {
                link: format!("https://fse.example/{year}"),
                location: "Online".to_string(),
                timeline: vec![],
            },
        );
    }
    store.add_or_merge_series(tier_a);

    let mut tier_b = base_series("FSE", Category::Engineering, "software fse");
    tier_b.rankings.insert("core".to_string(), "B".to_string());
    for year in 2015..2025 {
        tier_b.conferences.insert(
            year,
            Conference {
                link: format!("https://esec-fse.example/{year}"),
                location: "Online".to_string(),
                timeline: vec![],
            },
        );
    }
    store.add_or_merge_series(tier_b);

    // Both come back for the bare name; the tier-A series wins despite
    // having fewer recorded years.
    let name = normalize_series_name("IEEE FSE");
    let candidates = store.find_series(Some(&name), None).unwrap();
    assert_eq!(candidates.len(), 2);
    let picked = select_best_candidate(&candidates).unwrap();
    assert_eq!(picked.category, Category::Security);

    // Standard enrichment: clone the winner, attach statistics, merge.
    let mut enriched = picked.clone();
    enriched.acceptance_statistics.insert(
        2023,
        AcceptanceStatistics {
            accepted: 30,
            submitted: 120,
        },
    );
    store.add_or_merge_series(enriched);

    let hits = store
        .find_series(Some("FSE"), Some(Category::Security))
        .unwrap();
    assert_eq!(hits[0].acceptance_statistics[&2023].accepted, 30);
}
