//! Current-location lookup via ipinfo.io.

use std::env;

use alert_core::{async_trait, Coordinates, GatewayError, Locator};
use tracing::debug;

use crate::api_types::IpInfo;
use crate::{http_client, transport_error};

pub const DEFAULT_IPINFO_URL: &str = "https://ipinfo.io/json";

/// Locates the running machine from its public IP address.
pub struct IpInfoLocator {
    client: reqwest::Client,
    url: String,
}

impl IpInfoLocator {
    pub fn new(url: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http_client(None)?,
            url: url.into(),
        })
    }

    /// Build from `IPINFO_URL` (default: https://ipinfo.io/json).
    pub fn from_env() -> Result<Self, GatewayError> {
        let url = env::var("IPINFO_URL").unwrap_or_else(|_| DEFAULT_IPINFO_URL.to_string());
        Self::new(url)
    }
}

#[async_trait]
impl Locator for IpInfoLocator {
    async fn current_location(&self) -> Result<Coordinates, GatewayError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(GatewayError::Unavailable(format!(
                "ipinfo returned status {}",
                response.status()
            )));
        }

        let info: IpInfo = response
            .json()
            .await
            .map_err(|e| {
                GatewayError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;

        let loc = info
            .loc
            .ok_or_else(|| GatewayError::InvalidResponse("response has no loc field".to_string()))?;
        let coordinates = parse_loc(&loc)
            .ok_or_else(|| GatewayError::InvalidResponse(format!("unparseable loc: {}", loc)))?;

        debug!("Current location: {:?}", coordinates);
        Ok(coordinates)
    }

    fn name(&self) -> &str {
        "ipinfo"
    }
}

/// Parse ipinfo's `"lat,lng"` location string.
fn parse_loc(loc: &str) -> Option<Coordinates> {
    let (lat, lng) = loc.split_once(',')?;
    Some(Coordinates::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?))
}
