//! # conflux-store
//!
//! The reconciliation engine: a process-scoped registry of conference
//! series keyed by `(normalized name, category)`, with the merge algorithm
//! that combines records about the same series arriving from different
//! sources.
//!
//! Data-quality problems never cross the store boundary as errors. Hard
//! conflicts (description, rankings, conference identity) abandon a merge
//! wholesale and are logged at `error`; soft conflicts (acceptance
//! statistics) are logged at `warn` and resolved best-effort with the
//! incoming value winning. The only error a caller can see is
//! [`StoreError::InvalidQuery`] from a lookup with no criteria.

mod disambig;
mod error;
mod normalize;
mod store;

pub use disambig::{core_ranking_tier, select_best_candidate};
pub use error::StoreError;
pub use normalize::normalize_series_name;
pub use store::{ConferenceStore, SeriesKey};
