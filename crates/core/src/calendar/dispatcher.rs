//! Mutation dispatcher
//!
//! Routes an edit or delete on a unified event to whoever owns the record.
//! Notes are changed in place through the local store; interviews and
//! deadlines are deleted remotely or handed off to the job workspace;
//! external events are only ever opened at their provider.

use std::sync::Arc;

use careerdeck_domain::constants::{
    JOB_WORKSPACE_PATH, MSG_ACTION_UNAVAILABLE, MSG_EXTERNAL_DELETE_UNSUPPORTED,
    MSG_NO_EXTERNAL_LINK,
};
use careerdeck_domain::{
    DeadlineRecord, EventPayload, ExternalEventRecord, InterviewRecord, Note, Result, UnifiedEvent,
};
use tracing::{debug, info, instrument};

use super::mutation::Attempt;
use super::ports::UserPrompt;
use crate::store::{NoteStore, ReadRemoveStore};

/// What the user asked to do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Edit,
    Delete,
}

/// What happened, and what the surface should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The change went through. `reload` asks for a refetch of remote feeds.
    Applied { reload: bool },
    /// Hand off to an in-app route.
    Navigate(String),
    /// Open a provider page in a new browsing context.
    OpenExternal { url: String, notice: Option<String> },
    /// The user backed out at a prompt.
    Cancelled,
    /// A precondition is missing; informational only.
    Unavailable(String),
}

impl DispatchOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn needs_reload(&self) -> bool {
        matches!(self, Self::Applied { reload: true })
    }

    /// This outcome in the shared mutation shape. Dispatched changes are
    /// confirmed before the outcome exists, so there is nothing to roll back.
    pub fn attempt<S>(&self) -> Attempt<S> {
        if self.applied() {
            Attempt::committed()
        } else {
            Attempt::skipped()
        }
    }
}

/// Per-type edit/delete routing.
pub struct MutationDispatcher {
    notes: Arc<dyn NoteStore>,
    interviews: Arc<ReadRemoveStore<InterviewRecord>>,
    deadlines: Arc<ReadRemoveStore<DeadlineRecord>>,
    prompt: Arc<dyn UserPrompt>,
}

impl MutationDispatcher {
    pub fn new(
        notes: Arc<dyn NoteStore>,
        interviews: Arc<ReadRemoveStore<InterviewRecord>>,
        deadlines: Arc<ReadRemoveStore<DeadlineRecord>>,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        Self { notes, interviews, deadlines, prompt }
    }

    pub async fn edit(&self, event: &UnifiedEvent) -> Result<DispatchOutcome> {
        self.dispatch(event, EventAction::Edit).await
    }

    pub async fn delete(&self, event: &UnifiedEvent) -> Result<DispatchOutcome> {
        self.dispatch(event, EventAction::Delete).await
    }

    #[instrument(skip(self, event), fields(event_id = %event.id, kind = %event.kind()))]
    pub async fn dispatch(
        &self,
        event: &UnifiedEvent,
        action: EventAction,
    ) -> Result<DispatchOutcome> {
        let outcome = match (&event.payload, action) {
            (EventPayload::Note(note), EventAction::Edit) => self.rename_note(note).await?,
            (EventPayload::Note(note), EventAction::Delete) => {
                self.notes.remove(&note.id).await?;
                DispatchOutcome::Applied { reload: false }
            }
            (EventPayload::Interview { interview, .. }, EventAction::Edit) => {
                match interview.job_id.as_ref().filter(|id| !id.is_blank()) {
                    Some(job_id) => DispatchOutcome::Navigate(job_link(job_id.as_str(), "interview")),
                    None => DispatchOutcome::Unavailable(MSG_ACTION_UNAVAILABLE.to_string()),
                }
            }
            (EventPayload::Interview { interview, .. }, EventAction::Delete) => {
                if interview.id.is_blank() {
                    DispatchOutcome::Unavailable(MSG_ACTION_UNAVAILABLE.to_string())
                } else if !self.prompt.confirm(&format!("Delete the interview for {}?", interview.job_title)) {
                    DispatchOutcome::Cancelled
                } else {
                    self.interviews.remove(interview.id.as_str()).await?;
                    DispatchOutcome::Applied { reload: true }
                }
            }
            (EventPayload::Deadline(deadline), EventAction::Edit) => {
                if deadline.id.is_blank() {
                    DispatchOutcome::Unavailable(MSG_ACTION_UNAVAILABLE.to_string())
                } else {
                    DispatchOutcome::Navigate(job_link(deadline.id.as_str(), "deadline"))
                }
            }
            (EventPayload::Deadline(deadline), EventAction::Delete) => {
                if deadline.id.is_blank() {
                    DispatchOutcome::Unavailable(MSG_ACTION_UNAVAILABLE.to_string())
                } else if !self.prompt.confirm(&format!("Clear the application deadline for {}?", deadline.title)) {
                    DispatchOutcome::Cancelled
                } else {
                    self.deadlines.remove(deadline.id.as_str()).await?;
                    DispatchOutcome::Applied { reload: true }
                }
            }
            (EventPayload::External(record), EventAction::Edit) => match external_link(record) {
                Some(url) => DispatchOutcome::OpenExternal { url, notice: None },
                None => DispatchOutcome::Unavailable(MSG_NO_EXTERNAL_LINK.to_string()),
            },
            (EventPayload::External(record), EventAction::Delete) => match external_link(record) {
                Some(url) => DispatchOutcome::OpenExternal {
                    url,
                    notice: Some(MSG_EXTERNAL_DELETE_UNSUPPORTED.to_string()),
                },
                None => DispatchOutcome::Unavailable(MSG_NO_EXTERNAL_LINK.to_string()),
            },
        };

        debug!(?action, ?outcome, "event mutation dispatched");
        Ok(outcome)
    }

    async fn rename_note(&self, note: &Note) -> Result<DispatchOutcome> {
        let Some(title) = self.prompt.prompt_title(&note.title) else {
            return Ok(DispatchOutcome::Cancelled);
        };
        let title = title.trim();
        if title.is_empty() || title == note.title {
            return Ok(DispatchOutcome::Cancelled);
        }

        let renamed = Note { title: title.to_string(), ..note.clone() };
        self.notes.update(renamed).await?;
        info!(note_id = %note.id, "note renamed");
        Ok(DispatchOutcome::Applied { reload: false })
    }
}

fn job_link(job_id: &str, focus: &str) -> String {
    format!("{JOB_WORKSPACE_PATH}/{job_id}?focus={focus}")
}

fn external_link(record: &ExternalEventRecord) -> Option<String> {
    [record.html_link.as_deref(), record.hangout_link.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|link| !link.is_empty())
        .map(str::to_string)
}
