//! darkroom-server: the HTTP surface of the image transformation
//! service.
//!
//! Everything with real behavior lives below this crate —
//! `darkroom-pipeline` owns the pixel work and `darkroom-store` owns
//! the records. This crate wires them to the network: multipart upload
//! decoding, PNG data-URI encoding, the preview/commit orchestrator,
//! and the axum router.

pub mod app;
pub mod codec;
pub mod error;
pub mod service;

pub use app::router;
pub use error::ApiError;
