//! Consumer control.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

pub const STARTED_MESSAGE: &str = "Consumer started!";

#[derive(Serialize)]
pub struct StartResponse {
    pub message: &'static str,
    pub already_running: bool,
}

/// Start the background consumer if it is not already running.
pub async fn start_consumer(State(state): State<AppState>) -> Json<StartResponse> {
    let outcome = state.supervisor.start().await;

    Json(StartResponse {
        message: STARTED_MESSAGE,
        already_running: outcome.already_running(),
    })
}
