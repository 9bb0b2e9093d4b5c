//! Canonical account identity
//!
//! Integrations and the events synced from them populate their identifying
//! fields inconsistently (email on one, account id on another, only the
//! adapter-assigned integration id on a third). Both sides are reduced to a
//! key with [`canonicalize`] so attribution never depends on which field
//! happened to be filled in.

use careerdeck_domain::constants::POSITIONAL_KEY_PREFIX;

/// Trim and lowercase a candidate; blank values become `None`.
pub fn normalize_key(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// First candidate that survives normalization, in priority order.
pub fn canonicalize<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates.into_iter().find_map(normalize_key)
}

/// Last-resort key for an integration with no usable identifier.
pub fn positional_key(index: usize) -> String {
    format!("{POSITIONAL_KEY_PREFIX}-{index}")
}
