use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::traits::GeoLocator;
use crate::config::DEFAULT_GEOLOCATION_URL;
use crate::errors::CoreError;
use crate::models::widget::GeoLocation;

/// ipapi.co geolocation by caller IP.
///
/// - **Free**: no API key, rate limited per IP.
/// - **Endpoint**: `GET /json/` → city, country_name, timezone, latitude, longitude
pub struct IpApiLocator {
    client: Client,
    url: String,
}

impl IpApiLocator {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_GEOLOCATION_URL, None)
    }

    /// Point the locator at another endpoint with the same response shape.
    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    pub fn with_url(url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        };
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }
}

impl Default for IpApiLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an ipapi.co response body.
///
/// Rate-limited and reserved-range lookups come back as `"error": true`
/// with no location fields. That body still decodes, to an empty location,
/// so the widget shows "Unknown" and UTC rather than failing outright.
/// Only a body that is not JSON at all is an error.
pub fn parse_location(body: &str) -> Result<GeoLocation, CoreError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("error").and_then(|e| e.as_bool()) == Some(true) {
        let reason = value
            .get("reason")
            .and_then(|r| r.as_str())
            .unwrap_or("unknown reason");
        tracing::warn!(provider = "ipapi", reason, "geolocation lookup refused");
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl GeoLocator for IpApiLocator {
    fn name(&self) -> &str {
        "ipapi"
    }

    async fn locate(&self) -> Result<GeoLocation, CoreError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .text()
            .await?;
        parse_location(&body)
    }
}
