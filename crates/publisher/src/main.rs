//! Publisher server binary.

use std::sync::Arc;

use event_store::EventStore;
use gateways::NominatimGeocoder;
use publisher::{router, AppState, Config, PublisherService};
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
        key_strategy = ?config.key_strategy,
        "Starting publisher"
    );

    let store = EventStore::open(&config.data_dir)?.with_key_strategy(config.key_strategy);
    let geocoder = NominatimGeocoder::from_env()?;
    let state = AppState::new(PublisherService::new(Arc::new(geocoder), store));

    let app = router().with_state(state);

    info!(addr = %config.addr, "Publisher listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
