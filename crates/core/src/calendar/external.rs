//! External event adapter
//!
//! Turns events fetched from linked third-party calendars into external
//! [`UnifiedEvent`]s attributed to an account key. With no connected account
//! for the provider, nothing is fetched at all.

use std::collections::HashMap;
use std::sync::Arc;

use careerdeck_domain::{
    ColorTag, EventPayload, ExternalEventRecord, ExternalFetchResponse, ExternalFetchWindow,
    Integration, Result, UnifiedEvent,
};
use chrono::Duration;
use tracing::{debug, info, instrument, warn};

use super::identity::{canonicalize, normalize_key};
use super::ports::ExternalEventSource;
use super::time::{parse_day, parse_instant, start_of_day};

/// External events plus the first per-account failure, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalFeed {
    pub events: Vec<UnifiedEvent>,
    /// Non-fatal: some accounts failed, the rest still delivered
    pub warning: Option<String>,
}

/// Adapter over the external events collaborator.
pub struct ExternalEventAdapter {
    source: Arc<dyn ExternalEventSource>,
    provider: String,
    window: ExternalFetchWindow,
}

impl ExternalEventAdapter {
    pub fn new(
        source: Arc<dyn ExternalEventSource>,
        provider: impl Into<String>,
        window: ExternalFetchWindow,
    ) -> Self {
        Self { source, provider: provider.into(), window }
    }

    pub fn window(&self) -> ExternalFetchWindow {
        self.window
    }

    /// Whether any integration is a connected account of our provider.
    pub fn has_linked_account(&self, integrations: &[Integration]) -> bool {
        integrations
            .iter()
            .any(|integration| integration.is_connected() && integration.is_provider(&self.provider))
    }

    /// Fetch and map external events for the given integrations.
    #[instrument(skip(self, integrations), fields(provider = %self.provider))]
    pub async fn load(&self, integrations: &[Integration]) -> Result<ExternalFeed> {
        if !self.has_linked_account(integrations) {
            debug!("no connected account for provider; skipping external fetch");
            return Ok(ExternalFeed::default());
        }

        let response = self.source.fetch_external_events(self.window).await?;
        let feed = self.map_response(response, integrations);
        info!(
            events = feed.events.len(),
            partial = feed.warning.is_some(),
            "external events loaded"
        );
        Ok(feed)
    }

    /// Map a fetched envelope into a feed. Pure.
    pub fn map_response(
        &self,
        response: ExternalFetchResponse,
        integrations: &[Integration],
    ) -> ExternalFeed {
        let warning = response.errors.first().map(|error| error.message.clone());
        if let Some(message) = &warning {
            warn!(
                failures = response.errors.len(),
                first = %message,
                "some external accounts failed to sync"
            );
        }

        let accounts = AccountIndex::new(integrations);
        let fallback_key = self.sole_account_key(integrations);
        let events = response
            .events
            .into_iter()
            .filter_map(|record| {
                let key = accounts.key_for(&record).or_else(|| fallback_key.map(str::to_string));
                external_event(record, key)
            })
            .collect();

        ExternalFeed { events, warning }
    }

    /// Key of the only connected provider account, used when an event names
    /// no account at all.
    fn sole_account_key<'a>(&self, integrations: &'a [Integration]) -> Option<&'a str> {
        let mut linked = integrations.iter().filter(|integration| {
            integration.is_connected() && integration.is_provider(&self.provider)
        });
        match (linked.next(), linked.next()) {
            (Some(only), None) => Some(only.client_key.as_str()),
            _ => None,
        }
    }
}

/// Every identifier an integration is known by, mapped to its client key.
///
/// An event may name its account by a different field than the one the
/// account's key was derived from, so each identifier is indexed.
struct AccountIndex<'a> {
    keys: HashMap<String, &'a str>,
}

impl<'a> AccountIndex<'a> {
    fn new(integrations: &'a [Integration]) -> Self {
        let mut keys = HashMap::new();
        for integration in integrations {
            let record = &integration.record;
            let identifiers = [
                record.external_email.as_deref(),
                record.external_account_id.as_deref(),
                Some(record.id.as_str()),
            ];
            for identifier in identifiers.into_iter().filter_map(normalize_key) {
                keys.entry(identifier).or_insert(integration.client_key.as_str());
            }
        }
        Self { keys }
    }

    /// Key of the account the record names, else its own canonical key.
    fn key_for(&self, record: &ExternalEventRecord) -> Option<String> {
        let candidates = event_candidates(record);
        candidates
            .iter()
            .filter_map(|candidate| normalize_key(*candidate))
            .find_map(|candidate| self.keys.get(&candidate).map(|key| key.to_string()))
            .or_else(|| canonicalize(candidates))
    }
}

fn event_candidates(record: &ExternalEventRecord) -> [Option<&str>; 3] {
    [
        record.external_email.as_deref(),
        record.external_account_id.as_deref(),
        record.integration_id.as_deref(),
    ]
}

/// Account key an external record names on its own.
pub fn integration_key_for(record: &ExternalEventRecord) -> Option<String> {
    canonicalize(event_candidates(record))
}

fn external_event(record: ExternalEventRecord, key: Option<String>) -> Option<UnifiedEvent> {
    let Some(key) = key else {
        warn!(event_id = %record.id, "external event names no account; skipping");
        return None;
    };

    let start = if record.all_day {
        parse_day(&record.start).map(start_of_day)
    } else {
        parse_instant(&record.start)
    };
    let Some(start) = start else {
        debug!(event_id = %record.id, raw = %record.start, "skipping external event with unreadable start");
        return None;
    };

    let default_end = if record.all_day { start + Duration::days(1) } else { start };
    let end = record
        .end
        .as_deref()
        .and_then(|raw| {
            if record.all_day {
                parse_day(raw).map(start_of_day)
            } else {
                parse_instant(raw)
            }
        })
        .filter(|end| *end >= start)
        .unwrap_or(default_end);

    let title = record
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|summary| !summary.is_empty())
        .unwrap_or("(No title)")
        .to_string();

    Some(UnifiedEvent {
        id: format!("external-{key}-{}", record.id),
        title,
        start,
        end,
        all_day: record.all_day,
        color_tag: ColorTag::External,
        integration_key: Some(key),
        payload: EventPayload::External(record),
    })
}
