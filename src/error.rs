use thiserror::Error;

pub type Result<T, E = FcmBatchError> = std::result::Result<T, E>;

/// Every failure a batch sender can surface to its caller.
///
/// Nothing is retried internally: each variant is raised from the operation
/// that detected it.
#[derive(Error, Debug)]
pub enum FcmBatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to fetch access token (status {status}). Body: {body}")]
    Auth { status: u16, body: String },

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
