//! Subscriber server binary.

use std::sync::Arc;

use alert_core::Narrator;
use event_store::{purge_directory, EventStore};
use gateways::{
    CommandPlayer, IpInfoLocator, OpenAiConfig, OpenAiNarrator, OpenAiSpeech, TemplateNarrator,
};
use subscriber::{
    router, AppState, Config, ConsumerLoop, ConsumerSupervisor, Gateways, NarrationBackend,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        data_dir = %config.data_dir.display(),
        audio_dir = %config.audio_dir.display(),
        affected_distance_km = config.consumer.affected_distance_km,
        "Starting subscriber"
    );

    // Leftovers from a previous run are never announced
    let store = EventStore::open(&config.data_dir)?;
    let stale_records = store.clear_all()?;
    let stale_artifacts = purge_directory(&config.audio_dir)?;
    info!(stale_records, stale_artifacts, "Purged data and audio directories");

    let openai = OpenAiConfig::from_env()?;
    let narrator: Arc<dyn Narrator> = match config.narration {
        NarrationBackend::OpenAi => Arc::new(OpenAiNarrator::new(openai.clone())?),
        NarrationBackend::Template => Arc::new(TemplateNarrator::new()),
    };
    let gateways = Gateways::new(
        Arc::new(IpInfoLocator::from_env()?),
        narrator,
        Arc::new(OpenAiSpeech::new(openai, &config.audio_dir)?),
        Arc::new(CommandPlayer::from_env()?),
    );

    let consumer = ConsumerLoop::new(store, &config.audio_dir, gateways, config.consumer.clone());
    let state = AppState::new(ConsumerSupervisor::new(consumer));

    let app = router().with_state(state);

    info!(addr = %config.addr, "Subscriber listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
