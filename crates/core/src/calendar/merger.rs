//! Event merger
//!
//! Concatenates normalized and external events and applies account
//! visibility. Only events carrying an integration key are filtered; internal
//! sources have no notion of a connection and always pass.

use std::collections::{BTreeSet, HashSet};

use careerdeck_domain::{EventKind, UnifiedEvent};
use chrono::{DateTime, Utc};

/// Merge knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Collapse external events with identical `(title, start, end)` that
    /// were reported by more than one account. Off: show both.
    pub dedupe_external: bool,
}

/// Merge with default options.
pub fn merge(
    normalized: &[UnifiedEvent],
    external: &[UnifiedEvent],
    visible_keys: &BTreeSet<String>,
) -> Vec<UnifiedEvent> {
    merge_with(normalized, external, visible_keys, MergeOptions::default())
}

/// Merge both feeds into one sequence ordered by start, then id.
pub fn merge_with(
    normalized: &[UnifiedEvent],
    external: &[UnifiedEvent],
    visible_keys: &BTreeSet<String>,
    options: MergeOptions,
) -> Vec<UnifiedEvent> {
    let mut seen_external: HashSet<(String, DateTime<Utc>, DateTime<Utc>)> = HashSet::new();

    let mut merged: Vec<UnifiedEvent> = normalized
        .iter()
        .chain(external.iter())
        .filter(|event| match &event.integration_key {
            Some(key) => visible_keys.contains(key),
            None => true,
        })
        .filter(|event| {
            if !options.dedupe_external || event.kind() != EventKind::External {
                return true;
            }
            seen_external.insert((event.title.clone(), event.start, event.end))
        })
        .cloned()
        .collect();

    merged.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    merged
}

/// Events overlapping the half-open window `[from, to)`.
pub fn events_between(
    events: &[UnifiedEvent],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<&UnifiedEvent> {
    events
        .iter()
        .filter(|event| event.start < to && (event.end > from || event.start >= from))
        .collect()
}
