//! Store error types.

use thiserror::Error;

/// Errors that can cross the store boundary.
///
/// Merge conflicts are deliberately not represented here: they are normal,
/// expected outcomes when upstream sources disagree, resolved internally
/// by logging and leaving existing data untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup called with neither a name nor a category.
    #[error("to find series, supply the name, the category, or both")]
    InvalidQuery,
}
