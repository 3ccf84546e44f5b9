//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::consumer::{
    CleanupPolicy, ConsumerConfig, DEFAULT_GATEWAY_TIMEOUT, DEFAULT_IDLE_INTERVAL,
};
use alert_core::DEFAULT_AFFECTED_DISTANCE_KM;

/// Which narrator produces alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationBackend {
    /// OpenAI-compatible chat completions.
    #[default]
    OpenAi,
    /// Fixed template, no network.
    Template,
}

impl FromStr for NarrationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(NarrationBackend::OpenAi),
            "template" => Ok(NarrationBackend::Template),
            other => Err(format!("unknown narration backend '{}'", other)),
        }
    }
}

/// Subscriber server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Directory holding pending event records.
    pub data_dir: PathBuf,
    /// Directory for synthesized audio.
    pub audio_dir: PathBuf,
    pub consumer: ConsumerConfig,
    pub narration: NarrationBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SUBSCRIBER_ADDR` | Server bind address | `127.0.0.1:5002` |
    /// | `EVENT_DATA_DIR` | Event store directory | `./data` |
    /// | `AUDIO_DIR` | Audio artifact directory | `./audio` |
    /// | `AFFECTED_DISTANCE_KM` | Announcement radius | `200` |
    /// | `CONSUMER_IDLE_SECS` | Pause after an empty scan | `5` |
    /// | `GATEWAY_TIMEOUT_SECS` | Narration/speech time limit | `60` |
    /// | `CLEANUP_POLICY` | `batch` or `per_record` | `batch` |
    /// | `NARRATION_BACKEND` | `openai` or `template` | `openai` |
    ///
    /// Gateway credentials and endpoints are read by the gateways.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SUBSCRIBER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5002".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let data_dir = env::var("EVENT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let audio_dir = env::var("AUDIO_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./audio"));

        let affected_distance_km =
            parse_var("AFFECTED_DISTANCE_KM", DEFAULT_AFFECTED_DISTANCE_KM)?;
        if !(affected_distance_km.is_finite() && affected_distance_km > 0.0) {
            return Err(ConfigError::Invalid {
                var: "AFFECTED_DISTANCE_KM",
                value: affected_distance_km.to_string(),
            });
        }

        let idle_interval = nonzero_secs(
            "CONSUMER_IDLE_SECS",
            parse_var("CONSUMER_IDLE_SECS", DEFAULT_IDLE_INTERVAL.as_secs())?,
        )?;
        let gateway_timeout = nonzero_secs(
            "GATEWAY_TIMEOUT_SECS",
            parse_var("GATEWAY_TIMEOUT_SECS", DEFAULT_GATEWAY_TIMEOUT.as_secs())?,
        )?;
        let cleanup = parse_var("CLEANUP_POLICY", CleanupPolicy::default())?;
        let narration = parse_var("NARRATION_BACKEND", NarrationBackend::default())?;

        Ok(Self {
            addr,
            data_dir,
            audio_dir,
            consumer: ConsumerConfig {
                affected_distance_km,
                idle_interval,
                gateway_timeout,
                cleanup,
            },
            narration,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Seconds for a duration that must be positive.
fn nonzero_secs(var: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SUBSCRIBER_ADDR format")]
    InvalidAddr,

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narration_backend_parsing() {
        assert_eq!("OpenAI".parse::<NarrationBackend>().unwrap(), NarrationBackend::OpenAi);
        assert_eq!("template".parse::<NarrationBackend>().unwrap(), NarrationBackend::Template);
        assert!("gpt".parse::<NarrationBackend>().is_err());
    }

    #[test]
    fn test_zero_durations_are_rejected() {
        let err = nonzero_secs("CONSUMER_IDLE_SECS", 0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "CONSUMER_IDLE_SECS",
                ..
            }
        ));
        assert_eq!(err.to_string(), "Invalid value for CONSUMER_IDLE_SECS: 0");

        assert!(nonzero_secs("GATEWAY_TIMEOUT_SECS", 0).is_err());
        assert_eq!(
            nonzero_secs("GATEWAY_TIMEOUT_SECS", 60).unwrap(),
            Duration::from_secs(60)
        );
    }
}
