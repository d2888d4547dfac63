//! Series name normalization.
//!
//! Upstream sources spell the same series differently (`"IEEE S&P"` vs
//! `"S&P"`, tabs vs spaces, doubled whitespace). Every adapter must run a
//! name through [`normalize_series_name`] before constructing a lookup
//! key, so records about the same series compare equal.

/// Canonicalize a free-text series name.
///
/// Replaces every whitespace character with a plain space, strips the
/// literal organization prefixes `"IEEE "` and `"ACM "` (case-sensitive,
/// also mid-string), then collapses runs of spaces and strips a leading
/// space until a fixed point is reached. Idempotent.
#[must_use]
pub fn normalize_series_name(name: &str) -> String {
    let mut current: String = name
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    current = current.replace("IEEE ", "").replace("ACM ", "");

    loop {
        let mut next = current.replace("  ", " ");
        if let Some(stripped) = next.strip_prefix(' ') {
            next = stripped.to_string();
        }
        if next == current {
            return current;
        }
        current = next;
    }
}
