//! Event submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::service::{PublishedEvent, Submission};
use crate::state::AppState;

pub const PUBLISHED_MESSAGE: &str = "Event published successfully!";

/// Confirmation returned for a stored event.
#[derive(Serialize)]
pub struct PublishResponse {
    pub message: &'static str,
    pub event: PublishedEvent,
}

/// Geocode and store a submitted event.
pub async fn publish(
    State(state): State<AppState>,
    body: std::result::Result<Json<Submission>, JsonRejection>,
) -> Result<Json<PublishResponse>> {
    let Json(submission) = body?;
    let event = state.publisher.publish(submission).await?;

    Ok(Json(PublishResponse {
        message: PUBLISHED_MESSAGE,
        event,
    }))
}
