//! Records owned by remote collaborators (job tracking, interviews, reminders)

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::impl_domain_status_conversions;

/// Identifier as sent by a collaborator.
///
/// Collaborators are inconsistent about numeric vs string ids, so both are
/// accepted and kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Job application deadline as listed by the job tracking collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineRecord {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    /// Date (`YYYY-MM-DD`) or RFC 3339 timestamp; `None` means no deadline.
    #[serde(default)]
    pub application_deadline: Option<String>,
}

/// Scheduled interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: RecordId,
    #[serde(default)]
    pub job_id: Option<RecordId>,
    #[serde(default, alias = "title")]
    pub job_title: String,
    #[serde(default, alias = "company")]
    pub job_company: String,
    pub scheduled_at: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default, alias = "interviewer")]
    pub interviewer_name: Option<String>,
    #[serde(default, alias = "externalLink")]
    pub external_event_link: Option<String>,
}

/// Reminder lead time before an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReminderType {
    #[serde(rename = "24h")]
    DayBefore,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "1h")]
    OneHour,
}

impl_domain_status_conversions!(ReminderType {
    DayBefore => "24h",
    TwoHours => "2h",
    OneHour => "1h",
});

impl ReminderType {
    /// Higher means closer to the interview.
    pub fn urgency(&self) -> u8 {
        match self {
            Self::DayBefore => 1,
            Self::TwoHours => 2,
            Self::OneHour => 3,
        }
    }
}

/// Active reminder for an interview.
///
/// The reminders collaborator reports the interview id under `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    #[serde(rename = "id", alias = "interviewId")]
    pub interview_id: RecordId,
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

impl ReminderRecord {
    /// Whether this reminder is the `(interview_id, reminder_type)` pair.
    pub fn matches(&self, interview_id: &RecordId, reminder_type: ReminderType) -> bool {
        &self.interview_id == interview_id && self.reminder_type == reminder_type
    }
}
