//! ccfddl.com feeds — the primary source.
//!
//! The conference feed (`allconf.yml`) provides full series records:
//! names, descriptions, rankings, and per-year editions with deadline
//! timelines. The acceptance feed (`allacc.yml`) provides statistics keyed
//! by series name alone, which requires the candidate-ranking heuristic
//! when a short name resolves to several series.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use conflux_core::{AcceptanceStatistics, Category, Conference, ConferenceSeries, Event};
use conflux_store::{ConferenceStore, normalize_series_name, select_best_candidate};

use crate::error::SourceError;
use crate::http::fetch_text;

#[derive(Debug, serde::Deserialize)]
struct ConfEntry {
    title: String,
    description: String,
    sub: String,
    #[serde(default)]
    rank: BTreeMap<String, String>,
    confs: Vec<ConfEdition>,
}

#[derive(Debug, serde::Deserialize)]
struct ConfEdition {
    year: i32,
    link: String,
    place: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    timeline: Vec<TimelineEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct TimelineEntry {
    deadline: String,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct AcceptEntry {
    title: String,
    accept_rates: Vec<AcceptRate>,
}

#[derive(Debug, serde::Deserialize)]
struct AcceptRate {
    year: i32,
    accepted: u32,
    submitted: u32,
}

/// Adapter for the ccfddl.com conference and acceptance feeds.
pub struct CcfddlSource {
    http: reqwest::Client,
    conference_url: String,
    acceptance_url: String,
}

impl CcfddlSource {
    #[must_use]
    pub fn new(http: reqwest::Client, conference_url: String, acceptance_url: String) -> Self {
        Self {
            http,
            conference_url,
            acceptance_url,
        }
    }

    /// Load the conference feed and merge every series into the store.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the feed cannot be fetched or parsed, or
    /// if an entry carries an unknown category code (which means the
    /// mapping table needs updating).
    pub async fn initial_load(&self, store: &mut ConferenceStore) -> Result<(), SourceError> {
        let text = fetch_text(&self.http, &self.conference_url).await?;
        let entries: Vec<ConfEntry> = serde_yaml::from_str(&strip_non_printable(&text))?;

        for entry in entries {
            let series = map_to_series(&entry)?;
            store.add_or_merge_series(series);
        }
        Ok(())
    }

    /// Load the acceptance feed and enrich existing series with
    /// statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the feed cannot be fetched or parsed.
    /// Entries that match no series are logged and skipped.
    pub async fn additional_load(&self, store: &mut ConferenceStore) -> Result<(), SourceError> {
        let text = fetch_text(&self.http, &self.acceptance_url).await?;
        let entries: Vec<AcceptEntry> = serde_yaml::from_str(&strip_non_printable(&text))?;

        for entry in entries {
            apply_acceptance_entry(&entry, store);
        }
        Ok(())
    }
}

fn map_to_series(entry: &ConfEntry) -> Result<ConferenceSeries, SourceError> {
    let conferences = entry
        .confs
        .iter()
        .map(|edition| (edition.year, map_to_conference(edition)))
        .collect();

    Ok(ConferenceSeries {
        name: normalize_series_name(&entry.title),
        category: map_category(&entry.sub)?,
        description: entry.description.clone(),
        rankings: entry.rank.clone(),
        conferences,
        acceptance_statistics: BTreeMap::new(),
    })
}

fn map_to_conference(edition: &ConfEdition) -> Conference {
    let offset = parse_timezone_offset(edition.timezone.as_deref());
    let mut timeline = Vec::new();

    for entry in &edition.timeline {
        if entry.deadline.contains("TBD") {
            continue;
        }
        match parse_deadline(&entry.deadline, offset) {
            Some(date) => timeline.push(Event {
                date,
                description: entry.comment.clone().unwrap_or_default(),
            }),
            None => tracing::warn!(
                deadline = %entry.deadline,
                "skipping unparseable timeline deadline"
            ),
        }
    }

    if let Some(dates) = edition.date.as_deref().and_then(parse_conference_dates) {
        match dates {
            (start, Some(end)) => {
                if let Some(date) = midnight_utc(start) {
                    timeline.push(Event {
                        date,
                        description: "Conference start".to_string(),
                    });
                }
                if let Some(date) = midnight_utc(end) {
                    timeline.push(Event {
                        date,
                        description: "Conference end".to_string(),
                    });
                }
            }
            (start, None) => {
                if let Some(date) = midnight_utc(start) {
                    timeline.push(Event {
                        date,
                        description: "Conference".to_string(),
                    });
                }
            }
        }
    }

    Conference {
        link: edition.link.clone(),
        location: edition.place.clone(),
        timeline,
    }
}

fn apply_acceptance_entry(entry: &AcceptEntry, store: &mut ConferenceStore) {
    // Known inconsistency between the two ccfddl feeds.
    let title = if entry.title == "UbiComp" {
        "UbiComp/ISWC"
    } else {
        entry.title.as_str()
    };
    let name = normalize_series_name(title);

    // The feed supplies the name alone, which does not uniquely identify
    // a series: there can be several with the same short name in
    // different categories (e.g. FSE in Security vs. Engineering).
    let candidates = store.find_series(Some(&name), None).unwrap_or_default();
    if candidates.is_empty() {
        // The conference feed loads first, so this only happens when the
        // two feeds use inconsistent names.
        tracing::warn!(%name, "no matching series found for acceptance entry");
        return;
    }
    let Some(picked) = select_best_candidate(&candidates) else {
        return;
    };

    // Work on an owned copy so a rejected merge leaves no side effect.
    let mut series = picked.clone();
    for rate in &entry.accept_rates {
        // Cannot add statistics for years we have no conference data for.
        if !series.conferences.contains_key(&rate.year) {
            continue;
        }
        series.acceptance_statistics.insert(
            rate.year,
            AcceptanceStatistics {
                accepted: rate.accepted,
                submitted: rate.submitted,
            },
        );
    }
    store.add_or_merge_series(series);
}

fn map_category(sub: &str) -> Result<Category, SourceError> {
    match sub {
        "DS" => Ok(Category::Architecture),
        "NW" => Ok(Category::Networking),
        "SC" => Ok(Category::Security),
        "SE" => Ok(Category::Engineering),
        "DB" => Ok(Category::Databases),
        "CT" => Ok(Category::Theory),
        "CG" => Ok(Category::Graphics),
        "AI" => Ok(Category::ArtificialIntelligence),
        "HI" => Ok(Category::HumanInteraction),
        "MX" => Ok(Category::Other),
        other => Err(SourceError::Parse(format!(
            "unknown category code {other}, update the mapping"
        ))),
    }
}

/// Resolve a feed timezone string (`UTC-12`, `UTC+8`, `AoE`) to an offset.
///
/// Anywhere on Earth is UTC-12; it is also the feed default and the
/// fallback for anything unrecognized.
fn parse_timezone_offset(timezone: Option<&str>) -> FixedOffset {
    const AOE_HOURS: i32 = -12;
    let raw = timezone.unwrap_or("AoE").replace("UTC", "");
    let hours = if raw.eq_ignore_ascii_case("aoe") || raw.is_empty() {
        AOE_HOURS
    } else {
        raw.parse().unwrap_or(AOE_HOURS)
    };
    // Clamped to the real offset range, so the conversion cannot fail.
    FixedOffset::east_opt(hours.clamp(-12, 14) * 3600).expect("offset within range")
}

fn parse_deadline(deadline: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let trimmed = deadline.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|d| NaiveDateTime::new(d, NaiveTime::MIN))
        })
        .ok()?;
    naive.and_local_timezone(offset).single()
}

/// Best-effort parse of the free-text conference date field.
///
/// Handles `"May 20-23, 2024"`, `"June 29 - July 3, 2024"`, and
/// `"March 3, 2024"`. Anything else yields no conference events.
fn parse_conference_dates(date: &str) -> Option<(NaiveDate, Option<NaiveDate>)> {
    use std::sync::OnceLock;
    static SAME_MONTH: OnceLock<regex::Regex> = OnceLock::new();
    static CROSS_MONTH: OnceLock<regex::Regex> = OnceLock::new();
    static SINGLE: OnceLock<regex::Regex> = OnceLock::new();

    let same_month = SAME_MONTH.get_or_init(|| {
        regex::Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})\s*[-–]\s*(\d{1,2}),\s*(\d{4})$")
            .expect("regex should compile")
    });
    let cross_month = CROSS_MONTH.get_or_init(|| {
        regex::Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})\s*[-–]\s*([A-Za-z]+)\s+(\d{1,2}),\s*(\d{4})$")
            .expect("regex should compile")
    });
    let single = SINGLE.get_or_init(|| {
        regex::Regex::new(r"^([A-Za-z]+)\s+(\d{1,2}),\s*(\d{4})$").expect("regex should compile")
    });

    let date = date.trim();
    if let Some(caps) = same_month.captures(date) {
        let month = month_number(&caps[1])?;
        let year: i32 = caps[4].parse().ok()?;
        let start = NaiveDate::from_ymd_opt(year, month, caps[2].parse().ok()?)?;
        let end = NaiveDate::from_ymd_opt(year, month, caps[3].parse().ok()?)?;
        return Some((start, Some(end)));
    }
    if let Some(caps) = cross_month.captures(date) {
        let year: i32 = caps[5].parse().ok()?;
        let start = NaiveDate::from_ymd_opt(year, month_number(&caps[1])?, caps[2].parse().ok()?)?;
        let end = NaiveDate::from_ymd_opt(year, month_number(&caps[3])?, caps[4].parse().ok()?)?;
        return Some((start, Some(end)));
    }
    if let Some(caps) = single.captures(date) {
        let day = NaiveDate::from_ymd_opt(
            caps[3].parse().ok()?,
            month_number(&caps[1])?,
            caps[2].parse().ok()?,
        )?;
        return Some((day, None));
    }
    None
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    NaiveDateTime::new(date, NaiveTime::MIN)
        .and_local_timezone(FixedOffset::east_opt(0)?)
        .single()
}

/// Remove characters the YAML reader rejects. The upstream feed
/// occasionally carries stray control characters.
fn strip_non_printable(s: &str) -> String {
    s.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || !c.is_control())
        .collect()
}
