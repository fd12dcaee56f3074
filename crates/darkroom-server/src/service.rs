//! The pipeline orchestrator: preview vs. commit.
//!
//! Both entry points run the engine against a clone of the stored
//! *original* — not the working copy. Preview stops there; commit also
//! replaces the working copy and appends a history entry. Because each
//! commit restarts from the original with only its own parameter set,
//! commits do not layer onto one another; the history records every
//! parameter set but `current` reflects only the latest.

use darkroom_pipeline::{AppliedParams, DynamicImage, TransformParams};
use darkroom_store::ImageStore;
use uuid::Uuid;

use crate::error::ApiError;

/// Result of one engine run on behalf of a request.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// The transformed image.
    pub image: DynamicImage,
    /// Normalized record of the operations applied.
    pub applied: AppliedParams,
}

/// Run the engine against the stored original without touching the
/// record.
///
/// # Errors
///
/// [`ApiError::NotFound`] for an unknown id,
/// [`ApiError::InvalidArgument`] for a bad `channel_split` target.
pub fn preview(
    store: &ImageStore,
    id: Uuid,
    params: &TransformParams,
) -> Result<TransformOutcome, ApiError> {
    let original = store.original(id)?;
    let (image, applied) = darkroom_pipeline::apply(&original, params)?;
    Ok(TransformOutcome { image, applied })
}

/// Preview's computation, then make it stick: overwrite the working
/// copy and append a history entry. A failed engine run commits
/// nothing.
///
/// # Errors
///
/// Same failure modes as [`preview`].
pub fn commit(
    store: &ImageStore,
    id: Uuid,
    params: &TransformParams,
) -> Result<TransformOutcome, ApiError> {
    let outcome = preview(store, id, params)?;
    store.commit(id, outcome.image.clone(), outcome.applied.clone())?;
    Ok(outcome)
}
