//! Shared test helpers for `careerdeck-core` integration tests.
//!
//! One in-memory backend implements every collaborator port so a test can
//! seed records, inject failures per operation and inspect the calls made.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use careerdeck_core::{
    CalendarPorts, DeadlineSource, ExternalEventSource, InMemoryKeyValueStore, IntegrationSource,
    InterviewSource, JobUpdater, LifetimeGuard, ReminderSource, UserPrompt,
};
use careerdeck_domain::{
    CareerDeckError, ConnectResponse, DeadlineRecord, ExternalEventRecord, ExternalFetchResponse,
    ExternalFetchWindow, IntegrationRecord, IntegrationStatus, InterviewRecord, RecordId,
    ReminderRecord, ReminderType, Result,
};
use parking_lot::Mutex;

/// Operation names accepted by [`FakeBackend::fail`].
pub mod op {
    pub const LIST_DEADLINES: &str = "list_deadlines";
    pub const LIST_INTERVIEWS: &str = "list_interviews";
    pub const DELETE_INTERVIEW: &str = "delete_interview";
    pub const LIST_REMINDERS: &str = "list_active_reminders";
    pub const DISMISS_REMINDER: &str = "dismiss_reminder";
    pub const LIST_INTEGRATIONS: &str = "list_integrations";
    pub const START_CONNECT: &str = "start_connect";
    pub const DISCONNECT: &str = "disconnect_integration";
    pub const FETCH_EXTERNAL: &str = "fetch_external_events";
    pub const CLEAR_DEADLINE: &str = "clear_application_deadline";
}

/// In-memory collaborator backend.
#[derive(Default)]
pub struct FakeBackend {
    pub deadlines: Mutex<Vec<DeadlineRecord>>,
    pub interviews: Mutex<Vec<InterviewRecord>>,
    pub reminders: Mutex<Vec<ReminderRecord>>,
    pub integrations: Mutex<Vec<IntegrationRecord>>,
    pub external: Mutex<ExternalFetchResponse>,
    pub auth_url: Mutex<Option<String>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
    pub disconnected: Mutex<Vec<(RecordId, Option<String>)>>,
    pub dismissed: Mutex<Vec<(RecordId, ReminderType)>>,
    pub windows: Mutex<Vec<ExternalFetchWindow>>,
    /// Torn down from inside the deadlines call to simulate a surface
    /// disappearing mid-load.
    pub teardown_during_load: Mutex<Option<LifetimeGuard>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().remove(operation);
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().iter().filter(|call| **call == operation).count()
    }

    fn enter(&self, operation: &'static str) -> Result<()> {
        self.calls.lock().push(operation);
        if self.failing.lock().contains(operation) {
            return Err(CareerDeckError::Network(format!("{operation} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl DeadlineSource for FakeBackend {
    async fn list_deadlines(&self, limit: usize) -> Result<Vec<DeadlineRecord>> {
        if let Some(guard) = self.teardown_during_load.lock().take() {
            guard.teardown();
        }
        self.enter(op::LIST_DEADLINES)?;
        Ok(self.deadlines.lock().iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl InterviewSource for FakeBackend {
    async fn list_interviews(&self, _include_past: bool) -> Result<Vec<InterviewRecord>> {
        self.enter(op::LIST_INTERVIEWS)?;
        Ok(self.interviews.lock().clone())
    }

    async fn delete_interview(&self, id: &RecordId) -> Result<()> {
        self.enter(op::DELETE_INTERVIEW)?;
        self.interviews.lock().retain(|interview| &interview.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReminderSource for FakeBackend {
    async fn list_active_reminders(&self) -> Result<Vec<ReminderRecord>> {
        self.enter(op::LIST_REMINDERS)?;
        Ok(self.reminders.lock().clone())
    }

    async fn dismiss_reminder(
        &self,
        interview_id: &RecordId,
        reminder_type: ReminderType,
    ) -> Result<()> {
        self.enter(op::DISMISS_REMINDER)?;
        self.dismissed.lock().push((interview_id.clone(), reminder_type));
        self.reminders.lock().retain(|reminder| !reminder.matches(interview_id, reminder_type));
        Ok(())
    }
}

#[async_trait]
impl IntegrationSource for FakeBackend {
    async fn list_integrations(&self) -> Result<Vec<IntegrationRecord>> {
        self.enter(op::LIST_INTEGRATIONS)?;
        Ok(self.integrations.lock().clone())
    }

    async fn start_connect(&self, _return_url: &str) -> Result<ConnectResponse> {
        self.enter(op::START_CONNECT)?;
        Ok(ConnectResponse { auth_url: self.auth_url.lock().clone() })
    }

    async fn disconnect_integration(&self, id: &RecordId, reason: Option<&str>) -> Result<()> {
        self.enter(op::DISCONNECT)?;
        self.disconnected.lock().push((id.clone(), reason.map(str::to_string)));
        Ok(())
    }
}

#[async_trait]
impl ExternalEventSource for FakeBackend {
    async fn fetch_external_events(
        &self,
        window: ExternalFetchWindow,
    ) -> Result<ExternalFetchResponse> {
        self.enter(op::FETCH_EXTERNAL)?;
        self.windows.lock().push(window);
        Ok(self.external.lock().clone())
    }
}

#[async_trait]
impl JobUpdater for FakeBackend {
    async fn clear_application_deadline(&self, job_id: &RecordId) -> Result<()> {
        self.enter(op::CLEAR_DEADLINE)?;
        for deadline in self.deadlines.lock().iter_mut().filter(|d| &d.id == job_id) {
            deadline.application_deadline = None;
        }
        Ok(())
    }
}

/// Prompt with canned answers.
pub struct ScriptedPrompt {
    pub confirm: bool,
    pub title: Option<String>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(confirm: bool, title: Option<&str>) -> Arc<Self> {
        Arc::new(Self { confirm, title: title.map(str::to_string), asked: Mutex::new(Vec::new()) })
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.lock().push(message.to_string());
        self.confirm
    }

    fn prompt_title(&self, current: &str) -> Option<String> {
        self.asked.lock().push(current.to_string());
        self.title.clone()
    }
}

/// Ports wired to one backend, fresh local storage and the given prompt.
pub fn ports(backend: &Arc<FakeBackend>, prompt: Arc<ScriptedPrompt>) -> CalendarPorts {
    ports_with_slots(backend, prompt, Arc::new(InMemoryKeyValueStore::new()))
}

pub fn ports_with_slots(
    backend: &Arc<FakeBackend>,
    prompt: Arc<ScriptedPrompt>,
    slots: Arc<InMemoryKeyValueStore>,
) -> CalendarPorts {
    CalendarPorts {
        deadlines: backend.clone(),
        interviews: backend.clone(),
        reminders: backend.clone(),
        integrations: backend.clone(),
        external: backend.clone(),
        jobs: backend.clone(),
        slots,
        prompt,
    }
}

pub fn deadline(id: i64, title: &str, company: &str, due: Option<&str>) -> DeadlineRecord {
    DeadlineRecord {
        id: RecordId::from(id),
        title: title.to_string(),
        company_name: company.to_string(),
        application_deadline: due.map(str::to_string),
    }
}

pub fn interview(id: i64, job_id: Option<i64>, scheduled_at: &str, minutes: Option<i64>) -> InterviewRecord {
    InterviewRecord {
        id: RecordId::from(id),
        job_id: job_id.map(RecordId::from),
        job_title: "Interview".into(),
        job_company: "Beta".into(),
        scheduled_at: scheduled_at.to_string(),
        duration_minutes: minutes,
        location: None,
        meeting_link: None,
        interviewer_name: None,
        external_event_link: None,
    }
}

pub fn reminder(interview_id: i64, reminder_type: ReminderType) -> ReminderRecord {
    ReminderRecord { interview_id: RecordId::from(interview_id), reminder_type, scheduled_at: None }
}

pub fn integration(id: &str, status: IntegrationStatus, email: Option<&str>) -> IntegrationRecord {
    IntegrationRecord {
        id: RecordId::new(id),
        provider: "google".into(),
        status,
        external_email: email.map(str::to_string),
        external_account_id: None,
        last_error: None,
    }
}

pub fn external_event(id: &str, integration_id: &str, email: &str, summary: &str, start: &str) -> ExternalEventRecord {
    ExternalEventRecord {
        id: RecordId::new(id),
        integration_id: Some(integration_id.to_string()),
        external_email: Some(email.to_string()),
        external_account_id: None,
        summary: Some(summary.to_string()),
        start: start.to_string(),
        end: None,
        all_day: false,
        location: None,
        attendees: None,
        hangout_link: None,
        html_link: Some(format!("https://calendar.example/{id}")),
    }
}
