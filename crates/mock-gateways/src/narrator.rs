//! Predictable narrator.

use std::collections::HashSet;
use std::sync::Mutex;

use alert_core::{async_trait, AlertRequest, GatewayError, Narrator};

/// A narrator that renders `"ALERT <type> in <city>: <description>"`.
///
/// Cities registered with [`ScriptedNarrator::failing_for`] make the call
/// fail, which lets tests break a single record in a batch.
#[derive(Debug, Default)]
pub struct ScriptedNarrator {
    failing_cities: HashSet<String>,
    calls: Mutex<Vec<AlertRequest>>,
}

impl ScriptedNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail whenever asked to narrate an event in `city`.
    pub fn failing_for(mut self, city: &str) -> Self {
        self.failing_cities.insert(city.to_string());
        self
    }

    /// Every request this narrator received, including failed ones.
    pub fn calls(&self) -> Vec<AlertRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// The text this narrator produces for `request`.
    pub fn render(request: &AlertRequest) -> String {
        format!(
            "ALERT {} in {}: {}",
            request.event_type, request.city, request.description
        )
    }
}

#[async_trait]
impl Narrator for ScriptedNarrator {
    async fn narrate(&self, request: &AlertRequest) -> Result<String, GatewayError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        if self.failing_cities.contains(&request.city) {
            return Err(GatewayError::Unavailable(format!(
                "mock narrator refuses {}",
                request.city
            )));
        }

        Ok(Self::render(request))
    }

    fn name(&self) -> &str {
        "ScriptedNarrator"
    }
}
