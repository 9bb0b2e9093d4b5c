//! Wiring of the calendar service onto the real adapters.

use std::sync::Arc;

use careerdeck_core::{CalendarPorts, CalendarService, UserPrompt};
use careerdeck_domain::{Config, Result};
use tracing::info;

use crate::collaborators::ApiClient;
use crate::storage::FileKeyValueStore;

/// Build a [`CalendarService`] backed by the collaborator API and the local
/// storage file named in `config`.
pub fn calendar_service(config: &Config, prompt: Arc<dyn UserPrompt>) -> Result<CalendarService> {
    let api = Arc::new(ApiClient::new(&config.api)?);
    let slots = Arc::new(FileKeyValueStore::new(&config.storage.path));

    info!(base_url = %api.base_url(), storage = %slots.path().display(), "calendar service wired");

    let ports = CalendarPorts {
        deadlines: api.clone(),
        interviews: api.clone(),
        reminders: api.clone(),
        integrations: api.clone(),
        external: api.clone(),
        jobs: api,
        slots,
        prompt,
    };
    Ok(CalendarService::new(ports, config))
}
