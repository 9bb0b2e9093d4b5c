//! # CareerDeck Core
//!
//! Calendar aggregation logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for every remote collaborator
//! - The aggregation pipeline: normalizer, integration registry, external
//!   event adapter, visibility filter, merger and summary
//! - The mutation dispatcher and the `Store` abstraction behind it
//!
//! ## Architecture Principles
//! - Only depends on `careerdeck-domain`
//! - No HTTP, filesystem or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calendar;
pub mod store;

pub use calendar::dispatcher::{DispatchOutcome, EventAction, MutationDispatcher};
pub use calendar::external::{ExternalEventAdapter, ExternalFeed};
pub use calendar::identity::canonicalize;
pub use calendar::lifetime::LifetimeGuard;
pub use calendar::merger::{events_between, merge, merge_with, MergeOptions};
pub use calendar::mutation::{run_optimistic, Attempt};
pub use calendar::normalizer::{normalize, NormalizerInput};
pub use calendar::ports::{
    DeadlineSource, ExternalEventSource, IntegrationSource, InterviewSource, JobUpdater,
    KeyValueStore, ReminderSource, UserPrompt,
};
pub use calendar::registry::{IntegrationRegistry, RegistryState};
pub use calendar::service::{
    BannerLevel, CalendarPorts, CalendarService, CalendarSnapshot, Feed, LoadBanner, LoadReport,
};
pub use calendar::summary::{summarize, CalendarSummary, NextEvent};
pub use calendar::visibility::{Selection, VisibilityFilter};
pub use store::local::{InMemoryKeyValueStore, LocalNoteStore};
pub use store::remote::{RemoteDeadlineStore, RemoteInterviewStore};
pub use store::{NoteStore, ReadRemoveStore, Store};
