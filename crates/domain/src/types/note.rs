//! Locally owned focus blocks ("notes")

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a note on the timeline.
///
/// Always written as a whole so a drag or resize can never leave a note with
/// a start from one gesture and an end from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePlacement {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
}

impl NotePlacement {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, all_day: bool) -> Self {
        Self { start, end, all_day }
    }
}

/// User-authored note or focus block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

impl Note {
    pub fn placement(&self) -> NotePlacement {
        NotePlacement { start: self.start, end: self.end, all_day: self.all_day }
    }

    /// Overwrite the `(start, end, all_day)` triple in one step.
    pub fn place(&mut self, placement: NotePlacement) {
        let NotePlacement { start, end, all_day } = placement;
        self.start = start;
        self.end = end;
        self.all_day = all_day;
    }
}

/// Selection the user made on the grid, plus the title they typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    #[serde(flatten)]
    pub placement: NotePlacement,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn place_overwrites_the_whole_triple() {
        let start = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();
        let mut note = Note {
            id: "n1".into(),
            title: "Focus".into(),
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
        };

        let day = Utc.with_ymd_and_hms(2025, 11, 4, 0, 0, 0).unwrap();
        note.place(NotePlacement::new(day, day + chrono::Duration::days(1), true));

        assert_eq!(note.placement(), NotePlacement::new(day, day + chrono::Duration::days(1), true));
        assert_eq!(note.title, "Focus");
    }

    #[test]
    fn draft_flattens_placement_fields() {
        let json = r#"{"title":"Prep","start":"2025-11-03T09:00:00Z","end":"2025-11-03T10:00:00Z","allDay":false}"#;
        let draft: NoteDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.title, "Prep");
        assert!(!draft.placement.all_day);
    }
}
