//! Narration and speech synthesis via OpenAI-compatible APIs.

use std::path::{Path, PathBuf};

use alert_core::{async_trait, AlertRequest, GatewayError, Narrator, Synthesizer};
use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SpeechRequest,
};
use crate::config::OpenAiConfig;
use crate::{http_client, transport_error};

/// File name of the synthesized alert; each synthesis overwrites it.
pub const AUDIO_FILE_NAME: &str = "disaster_audio_response.mp3";

/// Build the system prompt that asks the model for an alert.
pub fn narration_prompt(request: &AlertRequest) -> String {
    format!(
        "You are a news reporter and a new disaster event has happened:\n\n\
         - Event Type: {} ({})\n\
         - Location: {}\n\n\
         Provide a concise and clear response for affected individuals. \
         Also mention that they are receiving this message because they are \
         within the affected area of {} km.",
        request.event_type,
        request.description,
        request.city,
        request.affected_distance_km.round()
    )
}

/// Writes alert prose with a chat completion model.
pub struct OpenAiNarrator {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiNarrator {
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        info!("OpenAiNarrator initialized with model: {}", config.narration_model);
        Ok(Self {
            client: http_client(None)?,
            config,
        })
    }

    /// See [`OpenAiConfig::from_env`] for the environment variables read.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(OpenAiConfig::from_env()?)
    }
}

#[async_trait]
impl Narrator for OpenAiNarrator {
    async fn narrate(&self, request: &AlertRequest) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest {
            model: self.config.narration_model.clone(),
            messages: vec![ChatMessage::system(narration_prompt(request))],
            temperature: Some(self.config.temperature),
        };

        debug!("Requesting narration for {} in {}", request.event_type, request.city);

        let response = self
            .client
            .post(self.config.endpoint("/v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| {
                GatewayError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GatewayError::InvalidResponse("completion had no content".to_string()))
    }

    fn name(&self) -> &str {
        "OpenAiNarrator"
    }
}

/// Synthesizes alert audio with a text-to-speech model.
pub struct OpenAiSpeech {
    client: Client,
    config: OpenAiConfig,
    audio_dir: PathBuf,
}

impl OpenAiSpeech {
    /// Create a synthesizer that writes its artifact into `audio_dir`.
    pub fn new(
        config: OpenAiConfig,
        audio_dir: impl Into<PathBuf>,
    ) -> Result<Self, GatewayError> {
        info!(
            "OpenAiSpeech initialized with model: {}, voice: {}",
            config.tts_model, config.tts_voice
        );
        Ok(Self {
            client: http_client(None)?,
            config,
            audio_dir: audio_dir.into(),
        })
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }
}

#[async_trait]
impl Synthesizer for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> Result<PathBuf, GatewayError> {
        let body = SpeechRequest {
            model: &self.config.tts_model,
            voice: &self.config.tts_voice,
            input: text,
        };

        let response = self
            .client
            .post(self.config.endpoint("/v1/audio/speech"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response).await?;

        tokio::fs::create_dir_all(&self.audio_dir).await?;
        let path = self.audio_dir.join(AUDIO_FILE_NAME);
        let mut file = tokio::fs::File::create(&path).await?;

        let mut stream = response.bytes_stream();
        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(transport_error)?;
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        debug!("Wrote {} bytes of audio to {}", written, path.display());
        Ok(path)
    }

    fn name(&self) -> &str {
        "OpenAiSpeech"
    }
}

/// Turn a non-2xx response into a gateway error, preferring the API's own message.
async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&error_text)
        .map(|e| e.error.message)
        .unwrap_or(error_text);

    Err(GatewayError::Unavailable(format!(
        "API error ({}): {}",
        status.as_u16(),
        message
    )))
}
