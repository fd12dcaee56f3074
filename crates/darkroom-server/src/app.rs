//! Router, handlers, and response payloads.
//!
//! Thin plumbing over the orchestrator and store: handlers parse the
//! request, delegate, and encode the result. Image ids arrive as path
//! strings; anything that fails to parse as a UUID is treated as an
//! unknown image rather than a malformed request, matching the "sole
//! lookup key" contract.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use darkroom_pipeline::{AppliedParams, Histogram, TransformParams, channel_histograms};
use darkroom_store::{HistoryEntry, ImageStore, RecordView};
use image::GenericImageView;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::codec;
use crate::error::ApiError;
use crate::service::{self, TransformOutcome};

/// Uploads above this size are rejected before decoding.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The record store backing every endpoint.
    pub store: Arc<ImageStore>,
}

/// Build the application router around a store.
#[must_use]
pub fn router(store: Arc<ImageStore>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/images", post(upload).get(list))
        .route("/images/{id}", get(get_one).delete(delete_one))
        .route("/images/{id}/preview", post(preview))
        .route("/images/{id}/transform", post(transform))
        .route("/images/{id}/history", get(history))
        .route("/images/{id}/histograms", get(histograms))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

/// Summary of one stored image.
#[derive(Debug, Serialize)]
struct ImagePayload {
    id: Uuid,
    filename: String,
    data: String,
    size: [u32; 2],
    created_at: DateTime<Utc>,
}

impl ImagePayload {
    fn from_view(view: &RecordView) -> Result<Self, ApiError> {
        Ok(Self {
            id: view.id,
            filename: view.filename.clone(),
            data: codec::encode_data_uri(&view.current)?,
            size: [view.size.0, view.size.1],
            created_at: view.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
struct ImageListPayload {
    images: Vec<ImagePayload>,
}

#[derive(Debug, Serialize)]
struct DeletePayload {
    message: &'static str,
}

/// Result of a preview or transform call.
#[derive(Debug, Serialize)]
struct TransformPayload {
    id: Uuid,
    data: String,
    size: [u32; 2],
    applied_params: AppliedParams,
}

impl TransformPayload {
    fn from_outcome(id: Uuid, outcome: &TransformOutcome) -> Result<Self, ApiError> {
        let (width, height) = outcome.image.dimensions();
        Ok(Self {
            id,
            data: codec::encode_data_uri(&outcome.image)?,
            size: [width, height],
            applied_params: outcome.applied.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct HistoryPayload {
    history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
struct HistogramsPayload {
    original: Histogram,
    processed: Histogram,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    // A non-UUID path segment can't name any record.
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImagePayload>, ApiError> {
    let mut part: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?
    {
        if field.name() == Some("file") || field.file_name().is_some() {
            let filename = field
                .file_name()
                .map_or_else(|| "upload".to_owned(), ToOwned::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            part = Some((filename, bytes.to_vec()));
            break;
        }
    }
    let (filename, bytes) = part.ok_or_else(|| ApiError::Decode("missing file field".to_owned()))?;

    let image = codec::decode(&bytes)?;
    let view = state.store.create(&filename, image);
    tracing::info!(id = %view.id, filename = %view.filename, "image uploaded");
    Ok(Json(ImagePayload::from_view(&view)?))
}

async fn list(State(state): State<AppState>) -> Result<Json<ImageListPayload>, ApiError> {
    let images = state
        .store
        .list()
        .iter()
        .map(ImagePayload::from_view)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(ImageListPayload { images }))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ImagePayload>, ApiError> {
    let view = state.store.get(parse_id(&id)?)?;
    Ok(Json(ImagePayload::from_view(&view)?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletePayload>, ApiError> {
    let id = parse_id(&id)?;
    state.store.remove(id)?;
    tracing::info!(%id, "image deleted");
    Ok(Json(DeletePayload {
        message: "Image deleted",
    }))
}

async fn preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(params): Json<TransformParams>,
) -> Result<Json<TransformPayload>, ApiError> {
    let id = parse_id(&id)?;
    let outcome = service::preview(&state.store, id, &params)?;
    Ok(Json(TransformPayload::from_outcome(id, &outcome)?))
}

async fn transform(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(params): Json<TransformParams>,
) -> Result<Json<TransformPayload>, ApiError> {
    let id = parse_id(&id)?;
    let outcome = service::commit(&state.store, id, &params)?;
    tracing::info!(%id, "transformation committed");
    Ok(Json(TransformPayload::from_outcome(id, &outcome)?))
}

async fn history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryPayload>, ApiError> {
    let history = state.store.history(parse_id(&id)?)?;
    Ok(Json(HistoryPayload { history }))
}

async fn histograms(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistogramsPayload>, ApiError> {
    let id = parse_id(&id)?;
    let original = state.store.original(id)?;
    let processed = state.store.current(id)?;
    Ok(Json(HistogramsPayload {
        original: channel_histograms(&original),
        processed: channel_histograms(&processed),
    }))
}
