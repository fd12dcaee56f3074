//! darkroom-store: in-memory image records.
//!
//! One [`ImageRecord`] per uploaded image — the immutable original,
//! the working copy that commits overwrite, and the append-only commit
//! history — held in a guarded map keyed by id ([`ImageStore`]).
//!
//! This crate knows nothing about HTTP or pixel transformations; it
//! stores what the engine produces and hands out independent clones
//! for the engine and histogram calculator to consume.

pub mod record;
pub mod store;

pub use record::{HistoryEntry, ImageRecord};
pub use store::{ImageStore, RecordView, StoreError};
