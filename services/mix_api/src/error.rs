//! Error types for the mix API

use alligo_solver::MixError;
use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::{self, Json, WithStatus};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Mix(#[from] MixError),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Unsupported mix type `{0}` (expected \"standard\")")]
    UnsupportedMixType(String),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] warp::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Mix(e) => e.kind(),
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::UnsupportedMixType(_) => "unsupported_mix_type",
            ApiError::Configuration { .. } => "configuration",
            ApiError::Http(_) => "http",
        }
    }

    /// Every request-level failure is the caller's to fix, including
    /// solver self-check failures; only service faults are 5xx
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Mix(_) | ApiError::MalformedBody(_) | ApiError::UnsupportedMixType(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Configuration { .. } | ApiError::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_reply(self) -> WithStatus<Json> {
        let status = self.status();
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        reply::with_status(reply::json(&ErrorBody::new(message, self.kind())), status)
    }
}

/// JSON error payload: `{"error": "...", "kind": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, kind: &'static str) -> Self {
        Self {
            error: error.into(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
