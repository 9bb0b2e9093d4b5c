//! Integration registry
//!
//! Tracks the external calendar accounts the user has linked, assigns each a
//! canonical client key and owns the visibility filter over those keys.
//! Disconnected integrations never enter the registry.

use std::collections::BTreeSet;
use std::sync::Arc;

use careerdeck_domain::{
    CareerDeckError, Integration, IntegrationRecord, IntegrationStatus, RecordId, Result,
};
use tracing::{debug, info, instrument, warn};

use super::identity::{canonicalize, positional_key};
use super::mutation::run_optimistic;
use super::ports::IntegrationSource;
use super::visibility::{connected_keys, VisibilityFilter};

/// Everything the registry owns; captured whole for rollback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryState {
    pub integrations: Vec<Integration>,
    pub visibility: VisibilityFilter,
}

impl RegistryState {
    pub fn connected_keys(&self) -> BTreeSet<String> {
        connected_keys(&self.integrations)
    }

    /// Effective visible key set.
    pub fn visible_keys(&self) -> BTreeSet<String> {
        self.visibility.resolve(&self.connected_keys())
    }
}

/// Registry of external calendar accounts.
pub struct IntegrationRegistry {
    source: Arc<dyn IntegrationSource>,
    state: RegistryState,
}

impl IntegrationRegistry {
    pub fn new(source: Arc<dyn IntegrationSource>) -> Self {
        Self { source, state: RegistryState::default() }
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn integrations(&self) -> &[Integration] {
        &self.state.integrations
    }

    pub fn visible_keys(&self) -> BTreeSet<String> {
        self.state.visible_keys()
    }

    /// Integrations in `error` status, for inline per-account reporting.
    pub fn integration_issues(&self) -> Vec<&Integration> {
        self.state
            .integrations
            .iter()
            .filter(|integration| integration.status() == IntegrationStatus::Error)
            .collect()
    }

    /// Fetch the active integrations without touching registry state.
    pub async fn fetch(&self) -> Result<Vec<Integration>> {
        let records = self.source.list_integrations().await?;
        Ok(assign_client_keys(records))
    }

    /// Replace the tracked integrations and drop stale visibility choices.
    pub fn apply(&mut self, integrations: Vec<Integration>) {
        self.state.integrations = integrations;
        let connected = self.state.connected_keys();
        self.state.visibility.narrow(&connected);
    }

    /// Re-fetch integrations from the collaborator.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<()> {
        let integrations = self.fetch().await?;
        info!(count = integrations.len(), "integrations refreshed");
        self.apply(integrations);
        Ok(())
    }

    /// Toggle visibility of one connected account.
    pub fn toggle(&mut self, key: &str) -> bool {
        let connected = self.state.connected_keys();
        self.state.visibility.toggle(key, &connected)
    }

    pub fn show_all(&mut self) {
        self.state.visibility.select_all();
    }

    /// Start linking a new account; returns the authorization URL to open.
    #[instrument(skip(self))]
    pub async fn connect(&self, return_url: &str) -> Result<String> {
        let response = self.source.start_connect(return_url).await?;
        match response.auth_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => Ok(url),
            None => {
                warn!("connect response carried no authorization url");
                Err(CareerDeckError::ConnectionStart(
                    "no authorization URL returned by the integrations service".into(),
                ))
            }
        }
    }

    /// Disconnect an account, removing it locally before the remote call.
    ///
    /// If the remote call fails, the integrations and visibility selection
    /// are restored exactly as they were.
    #[instrument(skip(self))]
    pub async fn disconnect(&mut self, integration_id: &str, reason: Option<&str>) -> Result<()> {
        let id = RecordId::new(integration_id.trim());
        if id.is_blank() {
            return Err(CareerDeckError::MissingIdentifier(
                "an integration id is required to disconnect".into(),
            ));
        }

        let result = run_optimistic(
            &mut self.state,
            |state| {
                state.integrations.retain(|integration| integration.id() != &id);
                let connected = state.connected_keys();
                state.visibility.narrow(&connected);
            },
            self.source.disconnect_integration(&id, reason),
        )
        .await;

        match &result {
            Ok(()) => info!(integration_id = %id, "integration disconnected"),
            Err(err) => warn!(integration_id = %id, error = %err, "disconnect failed; rolled back"),
        }
        result
    }
}

/// Drop disconnected records and derive a client key for the rest.
pub fn assign_client_keys(records: Vec<IntegrationRecord>) -> Vec<Integration> {
    records
        .into_iter()
        .enumerate()
        .filter(|(_, record)| {
            let keep = record.status != IntegrationStatus::Disconnected;
            if !keep {
                debug!(integration_id = %record.id, "skipping disconnected integration");
            }
            keep
        })
        .map(|(index, record)| {
            let client_key = canonicalize([
                record.external_email.as_deref(),
                record.external_account_id.as_deref(),
                Some(record.id.as_str()),
            ])
            .unwrap_or_else(|| positional_key(index));
            Integration { record, client_key }
        })
        .collect()
}
