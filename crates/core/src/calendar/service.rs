//! Calendar service
//!
//! Owns the latest settled snapshot of every feed and recomputes the merged
//! timeline from it on demand. Loads run the four independent feeds
//! concurrently; external events follow once integrations have resolved.
//! A failed feed degrades to empty with a banner and never aborts the load.

use std::collections::BTreeSet;
use std::sync::Arc;

use careerdeck_domain::constants::MSG_ACTION_UNAVAILABLE;
use careerdeck_domain::{
    impl_domain_status_conversions, CareerDeckError, Config, DeadlineRecord, EventPayload,
    ExternalFetchWindow, Integration, InterviewRecord, Note, NoteDraft, NotePlacement, RecordId,
    ReminderRecord, ReminderType, Result, UnifiedEvent,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use super::dispatcher::{DispatchOutcome, EventAction, MutationDispatcher};
use super::external::{ExternalEventAdapter, ExternalFeed};
use super::lifetime::LifetimeGuard;
use super::merger::{events_between, merge_with, MergeOptions};
use super::mutation::run_optimistic;
use super::normalizer::{normalize, NormalizerInput};
use super::ports::{
    DeadlineSource, ExternalEventSource, IntegrationSource, InterviewSource, JobUpdater,
    KeyValueStore, ReminderSource, UserPrompt,
};
use super::registry::IntegrationRegistry;
use super::summary::{summarize, CalendarSummary};
use crate::store::local::LocalNoteStore;
use crate::store::remote::{RemoteDeadlineStore, RemoteInterviewStore};
use crate::store::{NoteStore, ReadRemoveStore};

/// Every collaborator the service talks to.
pub struct CalendarPorts {
    pub deadlines: Arc<dyn DeadlineSource>,
    pub interviews: Arc<dyn InterviewSource>,
    pub reminders: Arc<dyn ReminderSource>,
    pub integrations: Arc<dyn IntegrationSource>,
    pub external: Arc<dyn ExternalEventSource>,
    pub jobs: Arc<dyn JobUpdater>,
    pub slots: Arc<dyn KeyValueStore>,
    pub prompt: Arc<dyn UserPrompt>,
}

/// Feed a banner refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Deadlines,
    Interviews,
    Reminders,
    Notes,
    Integrations,
    External,
}

impl_domain_status_conversions!(Feed {
    Deadlines => "deadlines",
    Interviews => "interviews",
    Reminders => "reminders",
    Notes => "notes",
    Integrations => "integrations",
    External => "external",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    /// The feed is empty because it failed
    Error,
    /// The feed is partial
    Warning,
}

/// Non-fatal load problem to show near the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBanner {
    pub feed: Feed,
    pub message: String,
    pub level: BannerLevel,
}

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub banners: Vec<LoadBanner>,
    /// Results arrived after teardown and were dropped.
    pub discarded: bool,
}

impl LoadReport {
    fn torn_down() -> Self {
        Self { banners: Vec::new(), discarded: true }
    }

    pub fn is_clean(&self) -> bool {
        self.banners.is_empty() && !self.discarded
    }

    pub fn banner(&self, feed: Feed) -> Option<&LoadBanner> {
        self.banners.iter().find(|banner| banner.feed == feed)
    }
}

/// Latest settled data for every feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarSnapshot {
    pub deadlines: Vec<DeadlineRecord>,
    pub interviews: Vec<InterviewRecord>,
    pub reminders: Vec<ReminderRecord>,
    pub notes: Vec<Note>,
    pub external: Vec<UnifiedEvent>,
}

/// Unified calendar over every feed.
pub struct CalendarService {
    deadlines: Arc<ReadRemoveStore<DeadlineRecord>>,
    interviews: Arc<ReadRemoveStore<InterviewRecord>>,
    notes: Arc<dyn NoteStore>,
    reminders: Arc<dyn ReminderSource>,
    registry: IntegrationRegistry,
    external: ExternalEventAdapter,
    dispatcher: MutationDispatcher,
    merge_options: MergeOptions,
    snapshot: CalendarSnapshot,
    lifetime: LifetimeGuard,
}

impl CalendarService {
    pub fn new(ports: CalendarPorts, config: &Config) -> Self {
        let deadlines: Arc<ReadRemoveStore<DeadlineRecord>> = Arc::new(RemoteDeadlineStore::new(
            ports.deadlines,
            ports.jobs,
            config.api.deadlines_limit,
        ));
        let interviews: Arc<ReadRemoveStore<InterviewRecord>> = Arc::new(
            RemoteInterviewStore::new(ports.interviews, config.calendar.include_past_interviews),
        );
        let notes: Arc<dyn NoteStore> =
            Arc::new(LocalNoteStore::new(ports.slots, config.storage.notes_key.clone()));

        let window = ExternalFetchWindow {
            days_past: config.calendar.days_past,
            days_future: config.calendar.days_future,
        };

        Self {
            dispatcher: MutationDispatcher::new(
                notes.clone(),
                interviews.clone(),
                deadlines.clone(),
                ports.prompt,
            ),
            deadlines,
            interviews,
            notes,
            reminders: ports.reminders,
            registry: IntegrationRegistry::new(ports.integrations),
            external: ExternalEventAdapter::new(
                ports.external,
                config.calendar.provider.clone(),
                window,
            ),
            merge_options: MergeOptions { dedupe_external: config.calendar.dedupe_external },
            snapshot: CalendarSnapshot::default(),
            lifetime: LifetimeGuard::new(),
        }
    }

    /// Handle for the consuming surface to call `teardown()` on.
    pub fn lifetime(&self) -> LifetimeGuard {
        self.lifetime.clone()
    }

    pub fn snapshot(&self) -> &CalendarSnapshot {
        &self.snapshot
    }

    /// Fetch every feed and replace the snapshot.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> LoadReport {
        let registry = &self.registry;
        let adapter = &self.external;
        let linked = async {
            match registry.fetch().await {
                Ok(integrations) => {
                    let feed = adapter.load(&integrations).await;
                    (Ok(integrations), feed)
                }
                Err(err) => (Err(err), Ok(ExternalFeed::default())),
            }
        };

        let (deadlines, interviews, reminders, notes, (integrations, external)) = futures::join!(
            self.deadlines.list(),
            self.interviews.list(),
            self.reminders.list_active_reminders(),
            self.notes.list(),
            linked,
        );

        if !self.lifetime.is_active() {
            debug!("calendar torn down during load; discarding results");
            return LoadReport::torn_down();
        }

        let mut report = LoadReport::default();
        self.snapshot.deadlines = settle(&mut report, Feed::Deadlines, deadlines);
        self.snapshot.interviews = settle(&mut report, Feed::Interviews, interviews);
        self.snapshot.reminders = settle(&mut report, Feed::Reminders, reminders);
        self.snapshot.notes = settle(&mut report, Feed::Notes, notes);
        self.apply_integrations(&mut report, integrations);
        self.apply_external(&mut report, external);

        info!(
            deadlines = self.snapshot.deadlines.len(),
            interviews = self.snapshot.interviews.len(),
            reminders = self.snapshot.reminders.len(),
            notes = self.snapshot.notes.len(),
            external = self.snapshot.external.len(),
            banners = report.banners.len(),
            "calendar loaded"
        );
        report
    }

    /// Refetch the remote-owned feeds after a remote mutation.
    #[instrument(skip(self))]
    pub async fn reload_remote(&mut self) -> LoadReport {
        let (deadlines, interviews, reminders) = futures::join!(
            self.deadlines.list(),
            self.interviews.list(),
            self.reminders.list_active_reminders(),
        );

        if !self.lifetime.is_active() {
            return LoadReport::torn_down();
        }

        let mut report = LoadReport::default();
        self.snapshot.deadlines = settle(&mut report, Feed::Deadlines, deadlines);
        self.snapshot.interviews = settle(&mut report, Feed::Interviews, interviews);
        self.snapshot.reminders = settle(&mut report, Feed::Reminders, reminders);
        report
    }

    /// Normalized internal events, before visibility and external merge.
    pub fn normalized(&self) -> Vec<UnifiedEvent> {
        normalize(&NormalizerInput {
            deadlines: &self.snapshot.deadlines,
            interviews: &self.snapshot.interviews,
            reminders: &self.snapshot.reminders,
            notes: &self.snapshot.notes,
        })
    }

    /// The merged, visibility-filtered timeline.
    pub fn timeline(&self) -> Vec<UnifiedEvent> {
        merge_with(
            &self.normalized(),
            &self.snapshot.external,
            &self.registry.visible_keys(),
            self.merge_options,
        )
    }

    /// Timeline events overlapping `[from, to)`.
    pub fn events_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<UnifiedEvent> {
        let timeline = self.timeline();
        events_between(&timeline, from, to).into_iter().cloned().collect()
    }

    pub fn summary(&self, now: DateTime<Utc>) -> CalendarSummary {
        summarize(&self.timeline(), self.snapshot.reminders.len(), now)
    }

    pub fn integrations(&self) -> &[Integration] {
        self.registry.integrations()
    }

    /// Accounts in error status, for per-account inline messages.
    pub fn integration_issues(&self) -> Vec<&Integration> {
        self.registry.integration_issues()
    }

    pub fn visible_keys(&self) -> BTreeSet<String> {
        self.registry.visible_keys()
    }

    /// Re-fetch integrations, then the external events they unlock.
    pub async fn refresh_integrations(&mut self) -> Result<Option<String>> {
        let integrations = self.registry.fetch().await?;
        if !self.lifetime.is_active() {
            return Ok(None);
        }
        self.registry.apply(integrations);
        self.refresh_external().await
    }

    /// Re-fetch external events. Returns the partial-failure warning, if any.
    pub async fn refresh_external(&mut self) -> Result<Option<String>> {
        let feed = self.external.load(self.registry.integrations()).await?;
        if !self.lifetime.is_active() {
            return Ok(None);
        }
        self.snapshot.external = feed.events;
        Ok(feed.warning)
    }

    /// Start linking an account; the caller navigates to the returned URL.
    pub async fn connect(&self, return_url: &str) -> Result<String> {
        self.registry.connect(return_url).await
    }

    pub async fn disconnect(&mut self, integration_id: &str, reason: Option<&str>) -> Result<()> {
        self.registry.disconnect(integration_id, reason).await
    }

    pub fn toggle_account(&mut self, key: &str) -> bool {
        self.registry.toggle(key)
    }

    pub fn show_all_accounts(&mut self) {
        self.registry.show_all();
    }

    /// Create a note over the selected range. A blank title creates nothing.
    #[instrument(skip(self))]
    pub async fn create_note(
        &mut self,
        title: &str,
        placement: NotePlacement,
    ) -> Result<Option<Note>> {
        if title.trim().is_empty() {
            debug!("note creation skipped: empty title");
            return Ok(None);
        }

        let note = self.notes.create(NoteDraft { title: title.to_string(), placement }).await?;
        self.snapshot.notes.push(note.clone());
        Ok(Some(note))
    }

    /// Drag a note to a new slot.
    pub async fn move_note(
        &mut self,
        note_id: &str,
        placement: NotePlacement,
    ) -> Result<Option<Note>> {
        self.place_note(note_id, placement).await
    }

    /// Stretch a note. Same write as a move: the whole placement is replaced.
    pub async fn resize_note(
        &mut self,
        note_id: &str,
        placement: NotePlacement,
    ) -> Result<Option<Note>> {
        self.place_note(note_id, placement).await
    }

    async fn place_note(&mut self, note_id: &str, placement: NotePlacement) -> Result<Option<Note>> {
        let placed = self.notes.place(note_id, placement).await?;
        match &placed {
            Some(note) => {
                if let Some(existing) = self.snapshot.notes.iter_mut().find(|n| n.id == note.id) {
                    *existing = note.clone();
                }
            }
            None => warn!(note_id, "placement ignored for unknown note"),
        }
        Ok(placed)
    }

    pub fn find_event(&self, event_id: &str) -> Option<UnifiedEvent> {
        self.timeline().into_iter().find(|event| event.id == event_id)
    }

    pub async fn edit(&mut self, event_id: &str) -> Result<DispatchOutcome> {
        self.act(event_id, EventAction::Edit).await
    }

    pub async fn delete(&mut self, event_id: &str) -> Result<DispatchOutcome> {
        self.act(event_id, EventAction::Delete).await
    }

    #[instrument(skip(self))]
    async fn act(&mut self, event_id: &str, action: EventAction) -> Result<DispatchOutcome> {
        let Some(event) = self.find_event(event_id) else {
            debug!("no such event in the timeline");
            return Ok(DispatchOutcome::Unavailable(MSG_ACTION_UNAVAILABLE.to_string()));
        };

        let outcome = match (&event.payload, action) {
            (EventPayload::Note(note), EventAction::Delete) => {
                let note_id = note.id.clone();
                run_optimistic(
                    &mut self.snapshot.notes,
                    |notes| notes.retain(|n| n.id != note_id),
                    self.dispatcher.delete(&event),
                )
                .await?
            }
            _ => self.dispatcher.dispatch(&event, action).await?,
        };

        if outcome.attempt::<()>().commit() && event.is_note() {
            self.snapshot.notes = self.notes.list().await?;
        }
        if outcome.needs_reload() {
            let report = self.reload_remote().await;
            for banner in &report.banners {
                warn!(feed = %banner.feed, message = %banner.message, "reload after mutation incomplete");
            }
        }
        Ok(outcome)
    }

    /// Dismiss one reminder. The local copy goes only after the collaborator
    /// confirms, and only the exact pair is removed.
    #[instrument(skip(self))]
    pub async fn dismiss_reminder(
        &mut self,
        interview_id: &str,
        reminder_type: ReminderType,
    ) -> Result<()> {
        let id = RecordId::new(interview_id.trim());
        if id.is_blank() {
            return Err(CareerDeckError::MissingIdentifier(
                "an interview id is required to dismiss a reminder".into(),
            ));
        }

        self.reminders.dismiss_reminder(&id, reminder_type).await?;
        self.snapshot.reminders.retain(|reminder| !reminder.matches(&id, reminder_type));
        info!(interview_id = %id, reminder_type = %reminder_type, "reminder dismissed");
        Ok(())
    }

    fn apply_integrations(
        &mut self,
        report: &mut LoadReport,
        integrations: Result<Vec<Integration>>,
    ) {
        match integrations {
            Ok(integrations) => self.registry.apply(integrations),
            Err(err) => {
                warn!(error = %err, "integrations failed to load; keeping last known accounts");
                report.banners.push(LoadBanner {
                    feed: Feed::Integrations,
                    message: err.to_string(),
                    level: BannerLevel::Error,
                });
            }
        }
    }

    fn apply_external(&mut self, report: &mut LoadReport, external: Result<ExternalFeed>) {
        match external {
            Ok(feed) => {
                if let Some(message) = feed.warning {
                    report.banners.push(LoadBanner {
                        feed: Feed::External,
                        message,
                        level: BannerLevel::Warning,
                    });
                }
                self.snapshot.external = feed.events;
            }
            Err(err) => {
                self.snapshot.external = settle(report, Feed::External, Err(err));
            }
        }
    }
}

/// Keep a feed's value, or degrade it to empty and record why.
fn settle<T>(report: &mut LoadReport, feed: Feed, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(feed = %feed, error = %err, "feed failed to load; showing it empty");
            report.banners.push(LoadBanner {
                feed,
                message: err.to_string(),
                level: BannerLevel::Error,
            });
            Vec::new()
        }
    }
}
