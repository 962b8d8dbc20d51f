//! Join key normalization shared by both sides of the join.
//!
//! `GeoEntity::wiki` and `RankedPage::title` must go through the same function
//! before storage or lookup, otherwise titles that should match silently stop
//! matching.

/// Canonical join key for a raw wiki title: spaces become `_` and commas
/// become `%2C`.
///
/// The output never contains a space or a comma, so applying it twice is a
/// no-op.
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            ' ' => out.push('_'),
            ',' => out.push_str("%2C"),
            other => out.push(other),
        }
    }
    out
}
