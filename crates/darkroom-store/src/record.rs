//! Per-image records: the immutable original, the mutable working
//! copy, and the append-only commit history.

use chrono::{DateTime, Utc};
use darkroom_pipeline::{AppliedParams, DynamicImage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One committed transformation: the normalized parameter record that
/// was applied and when it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Normalized parameters of the commit.
    pub params: AppliedParams,
    /// Commit timestamp.
    pub applied_at: DateTime<Utc>,
}

/// One uploaded image and everything the service knows about it.
///
/// `original` is captured at upload and never overwritten; `current`
/// starts as a copy of it and is replaced wholesale by each commit.
/// Fields are private so those invariants hold by construction —
/// mutation goes through [`ImageRecord::commit`] only.
///
/// [`ImageRecord::commit`]: Self::commit
#[derive(Debug, Clone)]
pub struct ImageRecord {
    id: Uuid,
    filename: String,
    created_at: DateTime<Utc>,
    original: DynamicImage,
    current: DynamicImage,
    history: Vec<HistoryEntry>,
}

impl ImageRecord {
    /// Create a record for a freshly uploaded image. The buffer is
    /// stored as both the original and the working copy.
    #[must_use]
    pub fn new(filename: String, image: DynamicImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            created_at: Utc::now(),
            original: image.clone(),
            current: image,
            history: Vec::new(),
        }
    }

    /// Unique record id.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Display filename from the upload.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Upload timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The pixel buffer captured at upload time.
    #[must_use]
    pub const fn original(&self) -> &DynamicImage {
        &self.original
    }

    /// The working copy — the result of the latest commit, or the
    /// original if nothing has been committed.
    #[must_use]
    pub const fn current(&self) -> &DynamicImage {
        &self.current
    }

    /// Width and height of the working copy.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.current.width(), self.current.height())
    }

    /// Committed transformations, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Replace the working copy and append a history entry.
    pub fn commit(&mut self, image: DynamicImage, params: AppliedParams) {
        self.current = image;
        self.history.push(HistoryEntry {
            params,
            applied_at: Utc::now(),
        });
    }
}
