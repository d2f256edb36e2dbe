use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message shown to callers when the failure is not one we report verbatim.
pub const FALLBACK_MESSAGE: &str = "Failed to fetch anime news. Please try again later.";

/// Everything that can go wrong while building the news feed.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("API responded with status: {0}")]
    UpstreamStatus(u16),

    #[error("Invalid response structure from AniList API")]
    InvalidShape,

    #[error("No anime news available")]
    Empty,

    #[error("Invalid time value")]
    InvalidTimestamp,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NewsError {
    /// Text placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            NewsError::Transport(_) | NewsError::Decode(_) => FALLBACK_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.public_message() }));
        (self.status_code(), body).into_response()
    }
}
