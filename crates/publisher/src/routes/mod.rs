//! Route handlers for the publisher.

pub mod health;
pub mod publish;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/publish", post(publish::publish))
        .route("/health", get(health::health))
}
