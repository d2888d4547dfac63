//! Guofei Gu's security conference statistics page — enrichment only.
//!
//! The page is a hand-maintained HTML table: the second table on the page,
//! with a header row of conference names and one row per year, each cell
//! holding text like `18.0% (94/521)`. Extraction is regex-based; the page
//! layout has been stable for years and carries no nested markup worth a
//! DOM parser.

use std::sync::OnceLock;

use conflux_core::{AcceptanceStatistics, Category};
use conflux_store::{ConferenceStore, normalize_series_name};
use regex::Regex;

use crate::error::SourceError;
use crate::http::fetch_text;

/// Adapter for the security conference statistics page.
pub struct GuofeiGuSource {
    http: reqwest::Client,
    url: String,
}

/// Statistics parsed for one table column (one conference series).
#[derive(Debug, PartialEq, Eq)]
struct ColumnStats {
    name: String,
    stats: Vec<(i32, AcceptanceStatistics)>,
}

impl GuofeiGuSource {
    #[must_use]
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// No standalone data; this source only enriches.
    #[allow(clippy::unused_async)]
    pub async fn initial_load(&self, _store: &mut ConferenceStore) -> Result<(), SourceError> {
        Ok(())
    }

    /// Fetch the statistics page and enrich matching Security series.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the page cannot be fetched or its table
    /// structure is missing. Columns that match no unique series are
    /// skipped.
    pub async fn additional_load(&self, store: &mut ConferenceStore) -> Result<(), SourceError> {
        let html = fetch_text(&self.http, &self.url).await?;
        for column in parse_statistics_table(&html)? {
            apply_column(&column, store);
        }
        Ok(())
    }
}

fn apply_column(column: &ColumnStats, store: &mut ConferenceStore) {
    let hits = store
        .find_series(Some(&column.name), Some(Category::Security))
        .unwrap_or_default();
    if hits.len() != 1 {
        // Series does not exist in our data.
        tracing::debug!(name = %column.name, "statistics column matches no series");
        return;
    }

    // Owned copy: a rejected merge must leave the store untouched.
    let mut series = hits[0].clone();
    for &(year, stats) in &column.stats {
        series.acceptance_statistics.insert(year, stats);
    }
    store.add_or_merge_series(series);
}

fn table_regexes() -> (&'static Regex, &'static Regex, &'static Regex, &'static Regex, &'static Regex)
{
    static TABLE: OnceLock<Regex> = OnceLock::new();
    static ROW: OnceLock<Regex> = OnceLock::new();
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    static STATS: OnceLock<Regex> = OnceLock::new();
    (
        TABLE.get_or_init(|| {
            Regex::new(r"(?s)<table[^>]*>.*?</table>").expect("regex should compile")
        }),
        ROW.get_or_init(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("regex should compile")),
        CELL.get_or_init(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("regex should compile")),
        ANCHOR.get_or_init(|| {
            Regex::new(r"(?s)<a[^>]*>(.*?)</a>").expect("regex should compile")
        }),
        STATS.get_or_init(|| {
            Regex::new(r"\d+\.\d+%\s?\((\d+)\s*/\s*(\d+)").expect("regex should compile")
        }),
    )
}

/// Extract per-column acceptance statistics from the page.
///
/// The first row is a caption and the second is the header; the first
/// cell of every data row is the year. Header cell `j` describes data
/// cell `j + 1`.
fn parse_statistics_table(html: &str) -> Result<Vec<ColumnStats>, SourceError> {
    let (table_re, row_re, cell_re, anchor_re, stats_re) = table_regexes();

    // The second table is the statistics table.
    let table = table_re
        .find_iter(html)
        .nth(1)
        .ok_or_else(|| {
            SourceError::Parse("expected at least two tables in statistics page".to_string())
        })?
        .as_str();

    let mut columns: Vec<ColumnStats> = Vec::new();
    for (i, row) in row_re.captures_iter(table).enumerate() {
        let row = &row[1];
        if i == 0 {
            continue;
        }
        if i == 1 {
            for cell in cell_re.captures_iter(row) {
                let text = anchor_re
                    .captures(&cell[1])
                    .map_or_else(|| cell[1].to_string(), |a| a[1].to_string());
                columns.push(ColumnStats {
                    name: normalize_series_name(&decode_text(&text)),
                    stats: Vec::new(),
                });
            }
            continue;
        }

        let cells: Vec<String> = cell_re.captures_iter(row).map(|c| c[1].to_string()).collect();
        let Some(year) = cells
            .first()
            .map(|c| decode_text(c))
            .and_then(|t| t.parse::<i32>().ok())
        else {
            continue;
        };
        for (j, cell) in cells.iter().enumerate().skip(1) {
            let Some(caps) = stats_re.captures(cell) else {
                continue;
            };
            let (Ok(accepted), Ok(submitted)) = (caps[1].parse(), caps[2].parse()) else {
                continue;
            };
            if let Some(column) = columns.get_mut(j - 1) {
                column
                    .stats
                    .push((year, AcceptanceStatistics { accepted, submitted }));
            }
        }
    }
    Ok(columns)
}

/// Strip residual markup and decode the entities the page actually uses.
fn decode_text(cell: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("regex should compile"));
    tag.replace_all(cell, "")
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}
