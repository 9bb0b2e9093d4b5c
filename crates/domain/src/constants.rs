//! Application constants
//!
//! Centralized location for the domain-level constants used by the calendar
//! aggregation engine.

// Normalizer defaults
pub const DEFAULT_INTERVIEW_DURATION_MINUTES: i64 = 60;

// External calendar
pub const EXTERNAL_CALENDAR_PROVIDER: &str = "google";
pub const DEFAULT_DAYS_PAST: u32 = 30;
pub const DEFAULT_DAYS_FUTURE: u32 = 90;
pub const POSITIONAL_KEY_PREFIX: &str = "integration";

// Collaborator defaults
pub const DEFAULT_DEADLINES_LIMIT: usize = 100;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 3;

// Local persistence
pub const NOTES_STORAGE_KEY: &str = "careerdeck.calendar.notes";
pub const DEFAULT_STORAGE_PATH: &str = "careerdeck-local.json";

// Deep links
pub const JOB_WORKSPACE_PATH: &str = "/jobs";

// User-facing messages
pub const MSG_ACTION_UNAVAILABLE: &str = "Action not available for this event";
pub const MSG_EXTERNAL_DELETE_UNSUPPORTED: &str =
    "Deleting external calendar events is not supported here; opened the provider instead";
pub const MSG_NO_EXTERNAL_LINK: &str = "This external event has no link to open";
