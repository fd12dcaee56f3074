//! The guarded-map record store.
//!
//! A single [`ImageStore`] owns every [`ImageRecord`] behind an
//! `RwLock<HashMap>`: reads (summaries, histogram inputs, preview
//! sources) take the shared lock, while create/commit/delete take the
//! exclusive one. Accessors hand out clones, never references into the
//! map, so callers can run pixel work without holding the lock and
//! previews can never alias a stored buffer.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use darkroom_pipeline::{AppliedParams, DynamicImage};
use uuid::Uuid;

use crate::record::{HistoryEntry, ImageRecord};

/// Errors produced by record store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The referenced image id is not in the store.
    #[error("image not found")]
    NotFound,
}

/// Lightweight view of one record, with a clone of its working copy.
///
/// This is what read paths return; encoding for the wire happens at
/// the HTTP boundary.
#[derive(Debug, Clone)]
pub struct RecordView {
    /// Record id.
    pub id: Uuid,
    /// Display filename.
    pub filename: String,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
    /// Width and height of the working copy.
    pub size: (u32, u32),
    /// Clone of the working copy.
    pub current: DynamicImage,
}

/// In-memory store of every uploaded image, keyed by id.
///
/// Process-local and unsynchronized to disk: contents are lost on
/// termination.
#[derive(Debug, Default)]
pub struct ImageStore {
    records: RwLock<HashMap<Uuid, ImageRecord>>,
}

impl ImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, ImageRecord>> {
        // A poisoned lock only means a panic elsewhere; the map itself
        // is always in a consistent state (mutations are single
        // assignments), so recover the guard rather than propagate.
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, ImageRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a freshly uploaded image and return its view.
    pub fn create(&self, filename: &str, image: DynamicImage) -> RecordView {
        let record = ImageRecord::new(filename.to_owned(), image);
        let view = view_of(&record);
        self.write().insert(record.id(), record);
        view
    }

    /// Views of every stored record. Order is unspecified.
    #[must_use]
    pub fn list(&self) -> Vec<RecordView> {
        self.read().values().map(view_of).collect()
    }

    /// View of one record.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not in the store.
    pub fn get(&self, id: Uuid) -> Result<RecordView, StoreError> {
        self.read().get(&id).map(view_of).ok_or(StoreError::NotFound)
    }

    /// Remove a record. Deleting the same id twice fails the second
    /// time.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not in the store.
    pub fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    /// Clone of the pixel buffer captured at upload time.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not in the store.
    pub fn original(&self, id: Uuid) -> Result<DynamicImage, StoreError> {
        self.read()
            .get(&id)
            .map(|r| r.original().clone())
            .ok_or(StoreError::NotFound)
    }

    /// Clone of the working copy.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not in the store.
    pub fn current(&self, id: Uuid) -> Result<DynamicImage, StoreError> {
        self.read()
            .get(&id)
            .map(|r| r.current().clone())
            .ok_or(StoreError::NotFound)
    }

    /// Commit history of one record, oldest first.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not in the store.
    pub fn history(&self, id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        self.read()
            .get(&id)
            .map(|r| r.history().to_vec())
            .ok_or(StoreError::NotFound)
    }

    /// Replace a record's working copy and append a history entry.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not in the store.
    pub fn commit(
        &self,
        id: Uuid,
        image: DynamicImage,
        params: AppliedParams,
    ) -> Result<(), StoreError> {
        let mut records = self.write();
        let record = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.commit(image, params);
        Ok(())
    }
}

fn view_of(record: &ImageRecord) -> RecordView {
    RecordView {
        id: record.id(),
        filename: record.filename().to_owned(),
        created_at: record.created_at(),
        size: record.size(),
        current: record.current().clone(),
    }
}
