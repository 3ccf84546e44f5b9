//! Configuration for the OpenAI-backed adapters.

use std::env;

use alert_core::GatewayError;

/// Settings shared by [`OpenAiNarrator`](crate::OpenAiNarrator) and
/// [`OpenAiSpeech`](crate::OpenAiSpeech).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Chat model used for narration.
    pub narration_model: String,

    /// Sampling temperature for narration (0.0 - 2.0).
    pub temperature: f32,

    /// Text-to-speech model.
    pub tts_model: String,

    /// Text-to-speech voice.
    pub tts_voice: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            narration_model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            tts_model: "tts-1".to_string(),
            tts_voice: "alloy".to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `NARRATION_MODEL` - Chat model (default: gpt-4o-mini)
    /// - `NARRATION_TEMPERATURE` - Temperature (default: 0.7)
    /// - `TTS_MODEL` - Speech model (default: tts-1)
    /// - `TTS_VOICE` - Speech voice (default: alloy)
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| GatewayError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("OPENAI_API_URL").unwrap_or(defaults.api_url);
        let narration_model = env::var("NARRATION_MODEL").unwrap_or(defaults.narration_model);
        let temperature = env::var("NARRATION_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.temperature);
        let tts_model = env::var("TTS_MODEL").unwrap_or(defaults.tts_model);
        let tts_voice = env::var("TTS_VOICE").unwrap_or(defaults.tts_voice);

        Ok(Self {
            api_url,
            api_key,
            narration_model,
            temperature,
            tts_model,
            tts_voice,
        })
    }

    /// Create a config with the given API key and defaults for everything else.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}
