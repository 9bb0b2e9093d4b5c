//! Visibility filter for external calendar accounts
//!
//! The user's choice is either "everything connected" or an explicit subset
//! of account keys. An explicit subset whose members have all disconnected
//! resolves back to everything connected.

use std::collections::BTreeSet;

use careerdeck_domain::Integration;

/// What the user asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No explicit choice: show every connected account
    #[default]
    All,
    /// Only these account keys
    Subset(BTreeSet<String>),
}

/// Keys of every integration in `connected` status.
pub fn connected_keys(integrations: &[Integration]) -> BTreeSet<String> {
    integrations
        .iter()
        .filter(|integration| integration.is_connected())
        .map(|integration| integration.client_key.clone())
        .collect()
}

/// Per-account visibility state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityFilter {
    selection: Selection,
}

impl VisibilityFilter {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Effective visible set given the currently connected keys.
    pub fn resolve(&self, connected: &BTreeSet<String>) -> BTreeSet<String> {
        match &self.selection {
            Selection::All => connected.clone(),
            Selection::Subset(keys) => {
                let surviving: BTreeSet<String> = keys.intersection(connected).cloned().collect();
                if surviving.is_empty() {
                    connected.clone()
                } else {
                    surviving
                }
            }
        }
    }

    /// Toggle one account. Returns whether the selection changed.
    ///
    /// Keys that are not connected cannot be toggled, and the last selected
    /// key cannot be removed.
    pub fn toggle(&mut self, key: &str, connected: &BTreeSet<String>) -> bool {
        if !connected.contains(key) {
            return false;
        }

        match &mut self.selection {
            Selection::All => {
                self.selection = Selection::Subset(BTreeSet::from([key.to_string()]));
                true
            }
            Selection::Subset(keys) => {
                if !keys.contains(key) {
                    keys.insert(key.to_string());
                    true
                } else if keys.len() == 1 {
                    false
                } else {
                    keys.remove(key);
                    true
                }
            }
        }
    }

    /// Drop selected keys that are no longer connected.
    pub fn narrow(&mut self, connected: &BTreeSet<String>) {
        if let Selection::Subset(keys) = &mut self.selection {
            keys.retain(|key| connected.contains(key));
            if keys.is_empty() {
                self.selection = Selection::All;
            }
        }
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::All;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn all_resolves_to_connected() {
        let filter = VisibilityFilter::default();
        assert_eq!(filter.resolve(&keys(&["a", "b"])), keys(&["a", "b"]));
    }

    #[test]
    fn subset_intersects_with_connected() {
        let filter = VisibilityFilter::new(Selection::Subset(keys(&["a", "stale"])));
        assert_eq!(filter.resolve(&keys(&["a", "b"])), keys(&["a"]));
    }

    #[test]
    fn subset_with_no_survivors_shows_everything() {
        let filter = VisibilityFilter::new(Selection::Subset(keys(&["gone"])));
        assert_eq!(filter.resolve(&keys(&["a", "b"])), keys(&["a", "b"]));
    }

    #[test]
    fn resolution_is_idempotent() {
        let connected = keys(&["a", "b", "c"]);
        let filter = VisibilityFilter::new(Selection::Subset(keys(&["b", "x"])));

        let once = filter.resolve(&connected);
        let twice = VisibilityFilter::new(Selection::Subset(once.clone())).resolve(&connected);
        assert_eq!(once, filter.resolve(&connected));
        assert_eq!(once, twice);
    }

    #[test]
    fn toggling_only_selected_key_is_noop() {
        let connected = keys(&["a", "b"]);
        let mut filter = VisibilityFilter::new(Selection::Subset(keys(&["a"])));

        assert!(!filter.toggle("a", &connected));
        assert_eq!(filter.selection(), &Selection::Subset(keys(&["a"])));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let connected = keys(&["a", "b"]);
        let mut filter = VisibilityFilter::default();

        assert!(filter.toggle("a", &connected));
        assert_eq!(filter.selection(), &Selection::Subset(keys(&["a"])));
        assert!(filter.toggle("b", &connected));
        assert!(filter.toggle("a", &connected));
        assert_eq!(filter.selection(), &Selection::Subset(keys(&["b"])));
    }

    #[test]
    fn disconnected_keys_cannot_be_toggled() {
        let mut filter = VisibilityFilter::default();
        assert!(!filter.toggle("gone", &keys(&["a"])));
        assert_eq!(filter.selection(), &Selection::All);
    }

    #[test]
    fn narrow_drops_stale_keys_and_collapses_to_all() {
        let mut filter = VisibilityFilter::new(Selection::Subset(keys(&["a", "b"])));
        filter.narrow(&keys(&["b", "c"]));
        assert_eq!(filter.selection(), &Selection::Subset(keys(&["b"])));

        filter.narrow(&keys(&["c"]));
        assert_eq!(filter.selection(), &Selection::All);
    }
}
