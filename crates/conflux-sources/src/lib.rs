//! # conflux-sources
//!
//! Upstream data source adapters for Conflux.
//!
//! Each adapter exposes two operations against the store: `initial_load`
//! builds primary series records, `additional_load` enriches existing
//! records (mostly with acceptance statistics). The orchestrator runs all
//! initial passes before any additional pass, because enrichment sources
//! assume primary records already exist.
//!
//! Sources:
//! - ccfddl.com conference + acceptance feeds (YAML)
//! - Guofei Gu's security conference statistics page (HTML)
//! - the previous run's own output artifact (JSON)
//!
//! The adapter set is an explicit registry assembled by
//! [`default_sources`]; there is no self-registration.

pub mod ccfddl;
pub mod guofeigu;
pub mod own;

mod error;
mod http;

pub use error::SourceError;

use std::path::PathBuf;
use std::time::Duration;

use conflux_store::ConferenceStore;

use crate::ccfddl::CcfddlSource;
use crate::guofeigu::GuofeiGuSource;
use crate::own::OwnSource;

/// Where each upstream lives. Field defaults point at the real feeds.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub ccfddl_conference_url: String,
    pub ccfddl_acceptance_url: String,
    pub guofeigu_url: String,
    pub own_data_path: PathBuf,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            ccfddl_conference_url: "https://ccfddl.com/conference/allconf.yml".to_string(),
            ccfddl_acceptance_url: "https://ccfddl.com/conference/allacc.yml".to_string(),
            guofeigu_url: "https://people.engr.tamu.edu/guofei/sec_conf_stat.htm".to_string(),
            own_data_path: PathBuf::from("data/conferences.json"),
            http_timeout_secs: 30,
            user_agent: "conflux/0.1".to_string(),
        }
    }
}

/// A configured upstream source.
///
/// A closed enum rather than a trait object: the adapter set is small,
/// known at compile time, and enumerable in tests.
pub enum Source {
    Ccfddl(CcfddlSource),
    GuofeiGu(GuofeiGuSource),
    Own(OwnSource),
}

impl Source {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ccfddl(_) => "ccfddl",
            Self::GuofeiGu(_) => "guofeigu",
            Self::Own(_) => "own",
        }
    }

    /// Build primary series records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the upstream cannot be fetched or
    /// parsed; the store is left with whatever was merged before the
    /// failure.
    pub async fn initial_load(&self, store: &mut ConferenceStore) -> Result<(), SourceError> {
        match self {
            Self::Ccfddl(source) => source.initial_load(store).await,
            Self::GuofeiGu(source) => source.initial_load(store).await,
            Self::Own(source) => source.initial_load(store).await,
        }
    }

    /// Enrich existing records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the upstream cannot be fetched or
    /// parsed.
    pub async fn additional_load(&self, store: &mut ConferenceStore) -> Result<(), SourceError> {
        match self {
            Self::Ccfddl(source) => source.additional_load(store).await,
            Self::GuofeiGu(source) => source.additional_load(store).await,
            Self::Own(source) => source.additional_load(store).await,
        }
    }
}

/// Assemble the full adapter set.
///
/// The own artifact loads first so curated data forms the baseline that
/// upstream feeds merge into.
///
/// # Panics
///
/// Panics if the underlying `reqwest::Client` fails to build.
#[must_use]
pub fn default_sources(config: &SourcesConfig) -> Vec<Source> {
    let http = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .expect("reqwest client should build");

    vec![
        Source::Own(OwnSource::new(config.own_data_path.clone())),
        Source::Ccfddl(CcfddlSource::new(
            http.clone(),
            config.ccfddl_conference_url.clone(),
            config.ccfddl_acceptance_url.clone(),
        )),
        Source::GuofeiGu(GuofeiGuSource::new(http, config.guofeigu_url.clone())),
    ]
}
