//! Client-local note store
//!
//! All notes live under a single key as one serialized list. Every mutation
//! rewrites the whole list immediately; lists are small and a reader must
//! never observe half of a change.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use careerdeck_domain::{CareerDeckError, Note, NoteDraft, NotePlacement, Result};
use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{NoteStore, Store};
use crate::calendar::ports::KeyValueStore;

/// Notes persisted in one key-value slot.
pub struct LocalNoteStore {
    slots: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl LocalNoteStore {
    pub fn new(slots: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { slots, key: key.into(), write_lock: Mutex::new(()) }
    }

    fn read(&self) -> Result<Vec<Note>> {
        let Some(raw) = self.slots.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored notes are unreadable; starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes).map_err(|err| {
            CareerDeckError::Storage(format!("failed to serialize notes: {err}"))
        })?;
        self.slots.set(&self.key, &raw)?;
        debug!(key = %self.key, count = notes.len(), "notes persisted");
        Ok(())
    }

    /// Read, change and write back the full list under the write lock.
    fn modify<R>(&self, change: impl FnOnce(&mut Vec<Note>) -> R) -> Result<R> {
        let _guard = self.write_lock.lock();
        let mut notes = self.read()?;
        let result = change(&mut notes);
        self.write(&notes)?;
        Ok(result)
    }
}

#[async_trait]
impl Store<Note> for LocalNoteStore {
    type Draft = NoteDraft;

    async fn list(&self) -> Result<Vec<Note>> {
        self.read()
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CareerDeckError::InvalidInput("a note needs a title".into()));
        }

        let NotePlacement { start, end, all_day } = draft.placement;
        let note = Note { id: Uuid::new_v4().to_string(), title: title.to_string(), start, end, all_day };

        let created = note.clone();
        self.modify(move |notes| notes.push(note))?;
        Ok(created)
    }

    async fn update(&self, item: Note) -> Result<Note> {
        let id = item.id.clone();
        let replacement = item.clone();
        let found = self.modify(move |notes| match notes.iter_mut().find(|note| note.id == id) {
            Some(existing) => {
                *existing = replacement;
                true
            }
            None => false,
        })?;

        if found {
            Ok(item)
        } else {
            Err(CareerDeckError::NotFound(format!("note {}", item.id)))
        }
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let removed = self.modify(|notes| {
            let before = notes.len();
            notes.retain(|note| note.id != id);
            before - notes.len()
        })?;
        if removed == 0 {
            debug!(note_id = id, "remove of unknown note ignored");
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for LocalNoteStore {
    async fn place(&self, id: &str, placement: NotePlacement) -> Result<Option<Note>> {
        self.modify(|notes| {
            notes.iter_mut().find(|note| note.id == id).map(|note| {
                note.place(placement);
                note.clone()
            })
        })
    }
}

/// Process-memory key-value slots, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
