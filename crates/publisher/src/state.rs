//! Application state shared across handlers.

use std::sync::Arc;

use crate::service::PublisherService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub publisher: Arc<PublisherService>,
}

impl AppState {
    pub fn new(publisher: PublisherService) -> Self {
        Self {
            publisher: Arc::new(publisher),
        }
    }
}
