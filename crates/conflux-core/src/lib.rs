//! # conflux-core
//!
//! Entity model for Conflux.
//!
//! This crate provides the value types shared across all Conflux crates:
//! - [`Category`], the closed set of research subfields used to
//!   disambiguate series that share a name
//! - [`ConferenceSeries`] and its nested records ([`Conference`],
//!   [`Event`], [`AcceptanceStatistics`])
//!
//! All types derive `Serialize`, `Deserialize`, and `JsonSchema`; the
//! serialized form is the output artifact consumed by the web UI.

pub mod category;
pub mod entities;

pub use category::Category;
pub use entities::{AcceptanceStatistics, Conference, ConferenceSeries, Event};
