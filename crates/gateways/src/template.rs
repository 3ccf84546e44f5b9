//! Offline narration from a fixed template.

use alert_core::{async_trait, AlertRequest, GatewayError, Narrator};

/// A narrator that renders alerts locally without calling a model.
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    /// Render the event into a short spoken alert.
    pub fn render(request: &AlertRequest) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Disaster alert for {}: event type {}.",
            request.city, request.event_type
        ));
        lines.push(request.description.clone());
        lines.push(format!(
            "You are receiving this message because you are within {} km of the affected area.",
            request.affected_distance_km.round()
        ));
        lines.join("\n")
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(&self, request: &AlertRequest) -> Result<String, GatewayError> {
        Ok(Self::render(request))
    }

    fn name(&self) -> &str {
        "TemplateNarrator"
    }
}
