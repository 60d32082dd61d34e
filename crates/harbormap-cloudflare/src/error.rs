//! Cloudflare integration error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("No Cloudflare API token or email/API key pair provided")]
    MissingCredentials,

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing webhook payload field: {0}")]
    MissingField(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cloudflare API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] harbormap_core::CoreError),
}

pub type Result<T> = std::result::Result<T, CloudflareError>;
