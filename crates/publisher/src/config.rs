//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use event_store::KeyStrategy;

/// Publisher server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Directory holding pending event records.
    pub data_dir: PathBuf,
    /// How record file names are derived.
    pub key_strategy: KeyStrategy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PUBLISHER_ADDR` | Server bind address | `127.0.0.1:5001` |
    /// | `EVENT_DATA_DIR` | Event store directory | `./data` |
    /// | `EVENT_KEY_STRATEGY` | `type_and_city` or `unique` | `type_and_city` |
    ///
    /// Geocoder settings (`NOMINATIM_URL`, `GEOCODER_USER_AGENT`) are read by
    /// the geocoder itself.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("PUBLISHER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5001".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let data_dir = env::var("EVENT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let key_strategy = match env::var("EVENT_KEY_STRATEGY") {
            Ok(value) => value.parse().map_err(ConfigError::InvalidKeyStrategy)?,
            Err(_) => KeyStrategy::default(),
        };

        Ok(Self {
            addr,
            data_dir,
            key_strategy,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PUBLISHER_ADDR format")]
    InvalidAddr,

    #[error("Invalid EVENT_KEY_STRATEGY: {0}")]
    InvalidKeyStrategy(String),
}
