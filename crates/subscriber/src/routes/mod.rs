//! Route handlers for the subscriber.

pub mod consumer;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start_consumer", get(consumer::start_consumer))
        .route("/health", get(health::health))
}
