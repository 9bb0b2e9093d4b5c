//! Summary synthesizer
//!
//! Counts and the next upcoming commitment, derived from the merged view.

use careerdeck_domain::{EventKind, UnifiedEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Next commitment, or an explicit "nothing upcoming" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "event", rename_all = "snake_case")]
pub enum NextEvent {
    Upcoming(Box<UnifiedEvent>),
    NoneUpcoming,
}

impl NextEvent {
    pub fn event(&self) -> Option<&UnifiedEvent> {
        match self {
            Self::Upcoming(event) => Some(event),
            Self::NoneUpcoming => None,
        }
    }
}

/// Dashboard calendar summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSummary {
    pub deadlines_count: usize,
    pub interviews_count: usize,
    pub reminders_count: usize,
    pub next_event: NextEvent,
}

/// Summarise the merged events.
///
/// `reminders_count` is passed through untouched: reminder state is reported
/// as-is regardless of account visibility. Notes are self-scheduled and never
/// count as the next commitment.
pub fn summarize(
    merged: &[UnifiedEvent],
    reminders_count: usize,
    now: DateTime<Utc>,
) -> CalendarSummary {
    let count = |kind: EventKind| merged.iter().filter(|event| event.kind() == kind).count();

    let next_event = merged
        .iter()
        .filter(|event| !event.is_note() && event.start >= now)
        .min_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)))
        .map_or(NextEvent::NoneUpcoming, |event| NextEvent::Upcoming(Box::new(event.clone())));

    CalendarSummary {
        deadlines_count: count(EventKind::Deadline),
        interviews_count: count(EventKind::Interview),
        reminders_count,
        next_event,
    }
}

#[cfg(test)]
mod tests {
    use careerdeck_domain::{DeadlineRecord, InterviewRecord, Note, RecordId};
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::calendar::normalizer::{deadline_event, interview_event, note_event};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap()
    }

    fn interview_at(id: i64, at: &str) -> UnifiedEvent {
        interview_event(
            &InterviewRecord {
                id: RecordId::from(id),
                job_id: None,
                job_title: "Onsite".into(),
                job_company: "Beta".into(),
                scheduled_at: at.into(),
                duration_minutes: None,
                location: None,
                meeting_link: None,
                interviewer_name: None,
                external_event_link: None,
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn counts_by_kind_and_passes_reminders_through() {
        let deadline = deadline_event(&DeadlineRecord {
            id: RecordId::from(1),
            title: "Backend Engineer".into(),
            company_name: "Acme".into(),
            application_deadline: Some("2025-12-01".into()),
        })
        .unwrap();
        let merged = vec![interview_at(2, "2025-11-21T10:00:00Z"), deadline];

        let summary = summarize(&merged, 3, now());
        assert_eq!(summary.deadlines_count, 1);
        assert_eq!(summary.interviews_count, 1);
        assert_eq!(summary.reminders_count, 3);
    }

    #[test]
    fn next_event_skips_past_events_and_notes() {
        let note = note_event(&Note {
            id: "n1".into(),
            title: "Focus".into(),
            start: now() + Duration::minutes(5),
            end: now() + Duration::hours(1),
            all_day: false,
        });
        let merged = vec![
            interview_at(1, "2025-11-20T09:00:00Z"),
            note,
            interview_at(2, "2025-11-22T09:00:00Z"),
            interview_at(3, "2025-11-21T09:00:00Z"),
        ];

        let summary = summarize(&merged, 0, now());
        assert_eq!(summary.next_event.event().map(|e| e.id.as_str()), Some("interview-3"));
    }

    #[test]
    fn nothing_upcoming_is_an_explicit_state() {
        let summary = summarize(&[interview_at(1, "2025-11-19T09:00:00Z")], 0, now());
        assert_eq!(summary.next_event, NextEvent::NoneUpcoming);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nextEvent"]["state"], "none_upcoming");
    }
}
