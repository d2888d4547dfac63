//! Layered configuration loading for Conflux using figment.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`CONFLUX_*` prefix, `__` as separator, e.g.
//!    `CONFLUX_OUTPUT__PATH`, `CONFLUX_HTTP__TIMEOUT_SECS`)
//! 2. A TOML file (`--config <path>`, or `conflux.toml` if present)
//! 3. Built-in defaults
//!
//! CLI flags are applied on top of the loaded config by `main`.

use std::path::{Path, PathBuf};

use conflux_sources::SourcesConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfluxConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where the serialized dataset is written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcesSection {
    #[serde(default)]
    pub ccfddl: CcfddlSection,
    #[serde(default)]
    pub guofeigu: GuofeiGuSection,
    #[serde(default)]
    pub own: OwnSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CcfddlSection {
    #[serde(default = "default_ccfddl_conference_url")]
    pub conference_url: String,
    #[serde(default = "default_ccfddl_acceptance_url")]
    pub acceptance_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuofeiGuSection {
    #[serde(default = "default_guofeigu_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OwnSection {
    /// Previous run's artifact to re-import; missing file is a no-op.
    #[serde(default = "default_own_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/conferences.json")
}

fn default_ccfddl_conference_url() -> String {
    SourcesConfig::default().ccfddl_conference_url
}

fn default_ccfddl_acceptance_url() -> String {
    SourcesConfig::default().ccfddl_acceptance_url
}

fn default_guofeigu_url() -> String {
    SourcesConfig::default().guofeigu_url
}

fn default_own_path() -> PathBuf {
    SourcesConfig::default().own_data_path
}

fn default_timeout_secs() -> u64 {
    SourcesConfig::default().http_timeout_secs
}

fn default_user_agent() -> String {
    SourcesConfig::default().user_agent
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for CcfddlSection {
    fn default() -> Self {
        Self {
            conference_url: default_ccfddl_conference_url(),
            acceptance_url: default_ccfddl_acceptance_url(),
        }
    }
}

impl Default for GuofeiGuSection {
    fn default() -> Self {
        Self {
            url: default_guofeigu_url(),
        }
    }
}

impl Default for OwnSection {
    fn default() -> Self {
        Self {
            path: default_own_path(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ConfluxConfig {
    /// Load configuration from defaults, a TOML file, and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layer fails to merge or the merged
    /// configuration does not extract.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(config_file).extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain. Public so tests can layer on top.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match config_file {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                let local = PathBuf::from("conflux.toml");
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        figment.merge(Env::prefixed("CONFLUX_").split("__"))
    }

    /// Flatten the sections into the adapter crate's config.
    #[must_use]
    pub fn sources_config(&self) -> SourcesConfig {
        SourcesConfig {
            ccfddl_conference_url: self.sources.ccfddl.conference_url.clone(),
            ccfddl_acceptance_url: self.sources.ccfddl.acceptance_url.clone(),
            guofeigu_url: self.sources.guofeigu.url.clone(),
            own_data_path: self.sources.own.path.clone(),
            http_timeout_secs: self.http.timeout_secs,
            user_agent: self.http.user_agent.clone(),
        }
    }
}
