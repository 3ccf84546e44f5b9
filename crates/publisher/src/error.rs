//! Error types for the publisher HTTP surface.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::service::PublishError;

/// Errors returned to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Publishing failed.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The request body was not a valid submission.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Publish(PublishError::MissingField(_))
            | ApiError::Publish(PublishError::LocationNotFound) => StatusCode::BAD_REQUEST,
            ApiError::Publish(PublishError::Geocoder(err)) => {
                tracing::error!("Geocoder error: {}", err);
                StatusCode::BAD_GATEWAY
            }
            ApiError::Publish(PublishError::Store(err)) => {
                tracing::error!("Store error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Publish(PublishError::Task(err)) => {
                tracing::error!("Store task error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for route handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
