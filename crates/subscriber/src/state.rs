//! Application state shared across handlers.

use std::sync::Arc;

use crate::supervisor::ConsumerSupervisor;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<ConsumerSupervisor>,
}

impl AppState {
    pub fn new(supervisor: ConsumerSupervisor) -> Self {
        Self {
            supervisor: Arc::new(supervisor),
        }
    }
}
