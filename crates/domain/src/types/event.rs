//! Unified calendar event
//!
//! Every feed (deadlines, interviews, notes, external calendars) is reduced
//! to a [`UnifiedEvent`] before merging, summarising or dispatching edits.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::integration::ExternalEventRecord;
use super::note::Note;
use super::records::{DeadlineRecord, InterviewRecord, ReminderRecord};
use crate::impl_domain_status_conversions;

/// Which source an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Deadline,
    Interview,
    Note,
    External,
}

impl_domain_status_conversions!(EventKind {
    Deadline => "deadline",
    Interview => "interview",
    Note => "note",
    External => "external",
});

/// Visual tag the rendering surface maps to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Deadline,
    Interview,
    /// Interview with an active reminder
    Urgent,
    Note,
    External,
}

impl_domain_status_conversions!(ColorTag {
    Deadline => "deadline",
    Interview => "interview",
    Urgent => "urgent",
    Note => "note",
    External => "external",
});

/// Original record an event was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum EventPayload {
    Deadline(DeadlineRecord),
    Interview {
        interview: InterviewRecord,
        reminder: Option<ReminderRecord>,
    },
    Note(Note),
    External(ExternalEventRecord),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Deadline(_) => EventKind::Deadline,
            Self::Interview { .. } => EventKind::Interview,
            Self::Note(_) => EventKind::Note,
            Self::External(_) => EventKind::External,
        }
    }
}

/// Tagged event consumed by the merger, summary and mutation dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub color_tag: ColorTag,
    /// Canonical account key; only ever set on external events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_key: Option<String>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl UnifiedEvent {
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn is_note(&self) -> bool {
        matches!(self.payload, EventPayload::Note(_))
    }

    /// Reminder attached to an interview event, if any.
    pub fn reminder(&self) -> Option<&ReminderRecord> {
        match &self.payload {
            EventPayload::Interview { reminder, .. } => reminder.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::records::RecordId;

    fn deadline_event() -> UnifiedEvent {
        let start = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        UnifiedEvent {
            id: "deadline-1".into(),
            title: "Deadline: Backend Engineer (Acme)".into(),
            start,
            end: start + chrono::Duration::days(1),
            all_day: true,
            color_tag: ColorTag::Deadline,
            integration_key: None,
            payload: EventPayload::Deadline(DeadlineRecord {
                id: RecordId::from(1),
                title: "Backend Engineer".into(),
                company_name: "Acme".into(),
                application_deadline: Some("2025-12-01".into()),
            }),
        }
    }

    #[test]
    fn kind_follows_payload() {
        let event = deadline_event();
        assert_eq!(event.kind(), EventKind::Deadline);
        assert!(!event.is_note());
        assert!(event.reminder().is_none());
    }

    #[test]
    fn serializes_type_next_to_common_fields() {
        let json = serde_json::to_value(deadline_event()).unwrap();

        assert_eq!(json["type"], "deadline");
        assert_eq!(json["colorTag"], "deadline");
        assert_eq!(json["payload"]["companyName"], "Acme");
        assert!(json.get("integrationKey").is_none());
    }
}
