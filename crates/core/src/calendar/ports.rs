//! Port interfaces for the calendar collaborators
//!
//! These traits define the boundaries between the aggregation core and the
//! infrastructure that talks to the job tracker, interview service,
//! integrations service and client-local persistence. Method names are unique
//! across traits so a single HTTP client can implement all of them.

use async_trait::async_trait;
use careerdeck_domain::{
    ConnectResponse, DeadlineRecord, ExternalFetchResponse, ExternalFetchWindow, IntegrationRecord,
    InterviewRecord, RecordId, ReminderRecord, ReminderType, Result,
};

/// Job tracking collaborator: application deadlines.
#[async_trait]
pub trait DeadlineSource: Send + Sync {
    /// List jobs with their application deadline, at most `limit` rows
    async fn list_deadlines(&self, limit: usize) -> Result<Vec<DeadlineRecord>>;
}

/// Interview collaborator.
#[async_trait]
pub trait InterviewSource: Send + Sync {
    async fn list_interviews(&self, include_past: bool) -> Result<Vec<InterviewRecord>>;

    async fn delete_interview(&self, id: &RecordId) -> Result<()>;
}

/// Interview reminder state. Read-only apart from dismissal.
#[async_trait]
pub trait ReminderSource: Send + Sync {
    async fn list_active_reminders(&self) -> Result<Vec<ReminderRecord>>;

    /// Dismiss exactly the `(interview_id, reminder_type)` pair
    async fn dismiss_reminder(
        &self,
        interview_id: &RecordId,
        reminder_type: ReminderType,
    ) -> Result<()>;
}

/// External calendar account management.
#[async_trait]
pub trait IntegrationSource: Send + Sync {
    async fn list_integrations(&self) -> Result<Vec<IntegrationRecord>>;

    /// Ask for an authorization redirect; navigation is the caller's job
    async fn start_connect(&self, return_url: &str) -> Result<ConnectResponse>;

    async fn disconnect_integration(&self, id: &RecordId, reason: Option<&str>) -> Result<()>;
}

/// Third-party events across every linked account.
#[async_trait]
pub trait ExternalEventSource: Send + Sync {
    async fn fetch_external_events(
        &self,
        window: ExternalFetchWindow,
    ) -> Result<ExternalFetchResponse>;
}

/// Job record updater, used to clear a deadline.
#[async_trait]
pub trait JobUpdater: Send + Sync {
    /// Set `applicationDeadline` to null on the job
    async fn clear_application_deadline(&self, job_id: &RecordId) -> Result<()>;
}

/// Durable client-local key-value slots.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// User interaction the dispatcher needs before some mutations.
pub trait UserPrompt: Send + Sync {
    /// Ask the user to confirm a destructive action
    fn confirm(&self, message: &str) -> bool;

    /// Ask for a new title; `None` means the user cancelled
    fn prompt_title(&self, current: &str) -> Option<String>;
}
