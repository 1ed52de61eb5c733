use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::WeatherProvider;
use crate::config::DEFAULT_WEATHER_URL;
use crate::errors::CoreError;

/// Open-Meteo forecast API for the current temperature.
///
/// - **Free**: no API key required.
/// - **Endpoint**: `/v1/forecast?latitude=..&longitude=..&current=temperature_2m`
pub struct OpenMeteoProvider {
    client: Client,
    url: String,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_WEATHER_URL, None)
    }

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

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Open-Meteo API response types ───────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
}

/// Pull the current temperature out of a forecast body.
pub fn parse_temperature(body: &str) -> Result<Option<f64>, CoreError> {
    let resp: ForecastResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: "Open-Meteo".into(),
        message: format!("Failed to parse forecast: {e}"),
    })?;
    Ok(resp.current.and_then(|c| c.temperature_2m))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &str {
        "Open-Meteo"
    }

    async fn current_temperature(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<f64>, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        // Error bodies are JSON without a `current` block and read as "no
        // reading"; only an undecodable body fails the lookup.
        if !status.is_success() {
            tracing::warn!(
                provider = "Open-Meteo",
                status = status.as_u16(),
                body = body.trim(),
                "forecast request failed"
            );
        }
        parse_temperature(&body)
    }
}
