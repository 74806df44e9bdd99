use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error; // Use thiserror for cleaner error definitions

// --- Domain/Infrastructure Errors ---

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Database backend error: {0}")]
    BackendError(#[from] anyhow::Error), // Wrap Anyhow errors from DB layer

    #[error("Stored meme data is corrupt: {0}")]
    DataCorruption(String),
}

#[derive(Error, Debug)]
pub enum CaptionError {
    /// Network-level failure reaching the captioning API: timeout,
    /// connection refused, DNS failure. Never retried here.
    #[error("Captioning API unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered, but not with the shape we expect.
    #[error("Unexpected captioning API response: {0}")]
    Protocol(String),
}

// --- Web Layer Error ---

#[derive(Error, Debug)]
pub enum AppError {
    // Input validation errors, client-caused
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Well-formed `success:false` answer from the captioning API.
    /// Kept separate from transport/protocol faults because the
    /// API-supplied message is safe to show the caller.
    #[error("Captioning rejected: {0}")]
    CaptionRejected(String),

    // Infrastructure errors (mapped from CaptionError/RepoError)
    #[error("Captioning call failed")]
    CaptionFailed(#[source] CaptionError),
    #[error("Could not save meme data")]
    RepositoryError(#[source] RepoError),

    // Configuration / Startup errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Initialization error: {0}")]
    InitError(String),

    // Generic Internal Server Error
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

// --- Conversions from Domain Errors to AppError ---

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::RepositoryError(err)
    }
}

impl From<CaptionError> for AppError {
    fn from(err: CaptionError) -> Self {
        AppError::CaptionFailed(err)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

// --- Axum Response Implementation ---

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // 4xx Client Errors
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // 404 mirrors the upstream gateway's long-observed behavior for
            // captioning rejections, even though 502/422 would arguably fit better.
            AppError::CaptionRejected(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // 5xx Server Errors. Internal detail is logged, never returned.
            AppError::CaptionFailed(e) => {
                tracing::error!(error.source = ?e, "Captioning call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Meme captioning service unavailable".to_string(),
                )
            }
            AppError::RepositoryError(e) => {
                tracing::error!(error.source = ?e, "Repository error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                )
            }
            AppError::ConfigError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AppError::InitError(msg) => {
                tracing::error!("Initialization error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server initialization error".to_string(),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        tracing::error!(error.message = %error_message, error.detail = %self, "Responding with error");

        // Every failure body carries the same shape the success path does.
        let body = Json(serde_json::json!({
            "success": false,
            "error_message": error_message,
        }));
        (status, body).into_response()
    }
}
