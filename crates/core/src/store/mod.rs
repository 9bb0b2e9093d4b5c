//! Record stores
//!
//! One narrow interface over every place an event's truth lives: the
//! client-local key-value slot for notes and the remote collaborators for
//! interviews and deadlines. Callers never need to know which one they hold.

pub mod local;
pub mod remote;

use std::convert::Infallible;

use async_trait::async_trait;
use careerdeck_domain::{Note, NoteDraft, NotePlacement, Result};

/// CRUD over one record type.
#[async_trait]
pub trait Store<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Input accepted by [`Store::create`]. Stores that cannot create use
    /// [`std::convert::Infallible`].
    type Draft: Send + 'static;

    async fn list(&self) -> Result<Vec<T>>;

    async fn create(&self, draft: Self::Draft) -> Result<T>;

    /// Replace the stored record with the same id
    async fn update(&self, item: T) -> Result<T>;

    /// Remove a record. Removing an unknown id is not an error.
    async fn remove(&self, id: &str) -> Result<()>;
}

/// Note store with the drag/resize operation.
#[async_trait]
pub trait NoteStore: Store<Note, Draft = NoteDraft> {
    /// Overwrite a note's `(start, end, all_day)` in one write.
    ///
    /// Returns `None` when the note does not exist.
    async fn place(&self, id: &str, placement: NotePlacement) -> Result<Option<Note>>;
}

/// Store whose records are created elsewhere.
pub type ReadRemoveStore<T> = dyn Store<T, Draft = Infallible>;
