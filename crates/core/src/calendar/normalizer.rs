//! Event normalizer
//!
//! Converts deadlines, interviews (with their reminders) and notes into
//! [`UnifiedEvent`]s. Pure and infallible: records that cannot be placed on a
//! timeline are dropped, malformed optional fields fall back to defaults.

use std::collections::HashMap;

use careerdeck_domain::constants::DEFAULT_INTERVIEW_DURATION_MINUTES;
use careerdeck_domain::{
    ColorTag, DeadlineRecord, EventPayload, InterviewRecord, Note, RecordId, ReminderRecord,
    UnifiedEvent,
};
use chrono::Duration;
use tracing::debug;

use super::time::{parse_day, parse_instant, start_of_day};

/// Current contents of the internal feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizerInput<'a> {
    pub deadlines: &'a [DeadlineRecord],
    pub interviews: &'a [InterviewRecord],
    pub reminders: &'a [ReminderRecord],
    pub notes: &'a [Note],
}

/// Normalize every internal feed, ordered by start then id.
pub fn normalize(input: &NormalizerInput<'_>) -> Vec<UnifiedEvent> {
    let reminders = most_urgent_reminders(input.reminders);

    let mut events: Vec<UnifiedEvent> = input
        .deadlines
        .iter()
        .filter_map(deadline_event)
        .chain(
            input
                .interviews
                .iter()
                .filter_map(|interview| {
                    interview_event(interview, reminders.get(&interview.id).copied())
                }),
        )
        .chain(input.notes.iter().map(note_event))
        .collect();

    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    events
}

/// Deadline as an all-day event on its due date.
pub fn deadline_event(deadline: &DeadlineRecord) -> Option<UnifiedEvent> {
    let raw = deadline.application_deadline.as_deref()?;
    let Some(day) = parse_day(raw) else {
        debug!(deadline_id = %deadline.id, raw, "dropping deadline with unreadable due date");
        return None;
    };

    let start = start_of_day(day);
    Some(UnifiedEvent {
        id: format!("deadline-{}", deadline.id),
        title: deadline_title(deadline),
        start,
        end: start + Duration::days(1),
        all_day: true,
        color_tag: ColorTag::Deadline,
        integration_key: None,
        payload: EventPayload::Deadline(deadline.clone()),
    })
}

/// Interview as a timed event; `reminder` marks it urgent.
pub fn interview_event(
    interview: &InterviewRecord,
    reminder: Option<&ReminderRecord>,
) -> Option<UnifiedEvent> {
    let Some(start) = parse_instant(&interview.scheduled_at) else {
        debug!(
            interview_id = %interview.id,
            scheduled_at = %interview.scheduled_at,
            "dropping interview with unreadable start"
        );
        return None;
    };

    let minutes = interview
        .duration_minutes
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_INTERVIEW_DURATION_MINUTES);

    let color_tag = if reminder.is_some() { ColorTag::Urgent } else { ColorTag::Interview };

    Some(UnifiedEvent {
        id: format!("interview-{}", interview.id),
        title: interview_title(interview),
        start,
        end: start + Duration::minutes(minutes),
        all_day: false,
        color_tag,
        integration_key: None,
        payload: EventPayload::Interview {
            interview: interview.clone(),
            reminder: reminder.cloned(),
        },
    })
}

pub fn note_event(note: &Note) -> UnifiedEvent {
    UnifiedEvent {
        id: format!("note-{}", note.id),
        title: note.title.clone(),
        start: note.start,
        end: note.end.max(note.start),
        all_day: note.all_day,
        color_tag: ColorTag::Note,
        integration_key: None,
        payload: EventPayload::Note(note.clone()),
    }
}

fn deadline_title(deadline: &DeadlineRecord) -> String {
    let title = non_blank(&deadline.title).unwrap_or("Application");
    match non_blank(&deadline.company_name) {
        Some(company) => format!("Deadline: {title} @ {company}"),
        None => format!("Deadline: {title}"),
    }
}

fn interview_title(interview: &InterviewRecord) -> String {
    let title = non_blank(&interview.job_title).unwrap_or("Interview");
    match non_blank(&interview.job_company) {
        Some(company) => format!("{title} @ {company}"),
        None => title.to_string(),
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// One reminder per interview: the one closest to the interview.
fn most_urgent_reminders(reminders: &[ReminderRecord]) -> HashMap<&RecordId, &ReminderRecord> {
    let mut by_interview: HashMap<&RecordId, &ReminderRecord> = HashMap::new();
    for reminder in reminders {
        by_interview
            .entry(&reminder.interview_id)
            .and_modify(|current| {
                if reminder.reminder_type.urgency() > current.reminder_type.urgency() {
                    *current = reminder;
                }
            })
            .or_insert(reminder);
    }
    by_interview
}
