//! Traits for the external capabilities the alert pipeline depends on.
//!
//! Every trait is object-safe so services can hold `Arc<dyn Trait>` and tests
//! can substitute doubles.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::event::AlertRequest;
use crate::geo::Coordinates;

/// Resolves a place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `(city, state, country)` to coordinates.
    ///
    /// Returns `Ok(None)` when the gateway answered but found no match, and
    /// `Err` when the gateway itself could not be used.
    async fn geocode(
        &self,
        city: &str,
        state: &str,
        country: &str,
    ) -> Result<Option<Coordinates>, GatewayError>;

    /// Get a human-readable name for this gateway.
    fn name(&self) -> &str;
}

/// Reports where the listening system currently is.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_location(&self) -> Result<Coordinates, GatewayError>;

    fn name(&self) -> &str;
}

/// Turns event facts into alert prose.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, request: &AlertRequest) -> Result<String, GatewayError>;

    fn name(&self) -> &str;
}

/// Synthesizes speech audio from text.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Write an audio artifact for `text` and return its path.
    ///
    /// Implementations may reuse a fixed file name, overwriting the previous
    /// artifact.
    async fn synthesize(&self, text: &str) -> Result<PathBuf, GatewayError>;

    fn name(&self) -> &str;
}

/// Plays an audio artifact.
#[async_trait]
pub trait Player: Send + Sync {
    /// Play `artifact` and return only once playback has finished.
    async fn play(&self, artifact: &Path) -> Result<(), GatewayError>;

    fn name(&self) -> &str;
}
