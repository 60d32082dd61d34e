//! Core error types

use thiserror::Error;

/// Errors produced by the core ingestion primitives
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown object kind: {0}")]
    UnknownKind(String),

    #[error("Sink rejected batch: {0}")]
    SinkError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
