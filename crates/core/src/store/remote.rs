//! Remote-backed stores
//!
//! Interviews and deadlines belong to their collaborators. The calendar can
//! list and remove them but never creates or rewrites them, so `Draft` is
//! uninhabited and `update` reports the action as unsupported.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use careerdeck_domain::{CareerDeckError, DeadlineRecord, InterviewRecord, RecordId, Result};
use tracing::{info, instrument};

use super::Store;
use crate::calendar::ports::{DeadlineSource, InterviewSource, JobUpdater};

fn read_only(kind: &str) -> CareerDeckError {
    CareerDeckError::InvalidInput(format!("{kind} records are edited in the job workspace"))
}

fn required_id(id: &str, kind: &str) -> Result<RecordId> {
    let id = RecordId::new(id.trim());
    if id.is_blank() {
        return Err(CareerDeckError::MissingIdentifier(format!("{kind} id is required")));
    }
    Ok(id)
}

/// Interviews from the interview collaborator.
pub struct RemoteInterviewStore {
    source: Arc<dyn InterviewSource>,
    include_past: bool,
}

impl RemoteInterviewStore {
    pub fn new(source: Arc<dyn InterviewSource>, include_past: bool) -> Self {
        Self { source, include_past }
    }
}

#[async_trait]
impl Store<InterviewRecord> for RemoteInterviewStore {
    type Draft = Infallible;

    async fn list(&self) -> Result<Vec<InterviewRecord>> {
        self.source.list_interviews(self.include_past).await
    }

    async fn create(&self, draft: Infallible) -> Result<InterviewRecord> {
        match draft {}
    }

    async fn update(&self, _item: InterviewRecord) -> Result<InterviewRecord> {
        Err(read_only("interview"))
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> Result<()> {
        let id = required_id(id, "interview")?;
        self.source.delete_interview(&id).await?;
        info!(interview_id = %id, "interview deleted");
        Ok(())
    }
}

/// Application deadlines from the job tracker.
///
/// Removing a deadline clears the job's deadline field; the job itself stays.
pub struct RemoteDeadlineStore {
    source: Arc<dyn DeadlineSource>,
    updater: Arc<dyn JobUpdater>,
    limit: usize,
}

impl RemoteDeadlineStore {
    pub fn new(source: Arc<dyn DeadlineSource>, updater: Arc<dyn JobUpdater>, limit: usize) -> Self {
        Self { source, updater, limit }
    }
}

#[async_trait]
impl Store<DeadlineRecord> for RemoteDeadlineStore {
    type Draft = Infallible;

    async fn list(&self) -> Result<Vec<DeadlineRecord>> {
        self.source.list_deadlines(self.limit).await
    }

    async fn create(&self, draft: Infallible) -> Result<DeadlineRecord> {
        match draft {}
    }

    async fn update(&self, _item: DeadlineRecord) -> Result<DeadlineRecord> {
        Err(read_only("deadline"))
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> Result<()> {
        let id = required_id(id, "job")?;
        self.updater.clear_application_deadline(&id).await?;
        info!(job_id = %id, "application deadline cleared");
        Ok(())
    }
}
