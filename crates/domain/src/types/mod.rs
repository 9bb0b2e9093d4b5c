//! Domain types and models
//!
//! Records arriving from collaborators keep their wire field names (camelCase)
//! through serde; timestamps stay as raw strings until the normalizer parses
//! them, so one malformed record never poisons a whole list.

pub mod event;
pub mod integration;
pub mod note;
pub mod records;

pub use event::{ColorTag, EventKind, EventPayload, UnifiedEvent};
pub use integration::{
    ConnectResponse, ExternalEventRecord, ExternalFetchResponse, ExternalFetchWindow, Integration,
    IntegrationRecord, IntegrationStatus, ProviderError,
};
pub use note::{Note, NoteDraft, NotePlacement};
pub use records::{DeadlineRecord, InterviewRecord, RecordId, ReminderRecord, ReminderType};
