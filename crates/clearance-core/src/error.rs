//! Error types for the Clearance core.

use thiserror::Error;

/// Errors surfaced at the crate's edges (payload decode, store access).
///
/// The normalizer operations themselves are total and never return these;
/// malformed fields degrade to documented fallback values instead.
#[derive(Error, Debug)]
pub enum ClearanceError {
    #[error("payload is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(String),
}
