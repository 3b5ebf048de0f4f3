use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use doodle_types::KeyError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    #[error("Invalid drawing. {0}")]
    InvalidPayload(String),

    #[error("Doodle {day_bucket}/{created_at} not found")]
    NotFound {
        day_bucket: String,
        created_at: String,
    },

    #[error("Doodle {day_bucket}/{created_at} already exists")]
    Conflict {
        day_bucket: String,
        created_at: String,
    },

    #[error("Storage backend failure: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidKey(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error bodies are the bare message as a JSON string.
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Upstream(e) => {
                error!("Storage backend failure: {:#}", e);
                "Storage backend failure".to_string()
            }
            other => {
                warn!("Rejected request: {}", other);
                other.to_string()
            }
        };
        (status, Json(message)).into_response()
    }
}
