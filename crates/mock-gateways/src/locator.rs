//! Fixed-position locator.

use std::sync::atomic::{AtomicUsize, Ordering};

use alert_core::{async_trait, Coordinates, GatewayError, Locator};

/// A locator that always reports the same position, or always fails.
#[derive(Debug)]
pub struct FixedLocator {
    location: Option<Coordinates>,
    calls: AtomicUsize,
}

impl FixedLocator {
    pub fn new(location: Coordinates) -> Self {
        Self {
            location: Some(location),
            calls: AtomicUsize::new(0),
        }
    }

    /// A locator whose backend is unreachable.
    pub fn failing() -> Self {
        Self {
            location: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn current_location(&self) -> Result<Coordinates, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.location
            .ok_or_else(|| GatewayError::Unavailable("mock locator is down".to_string()))
    }

    fn name(&self) -> &str {
        "FixedLocator"
    }
}
