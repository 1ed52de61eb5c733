use std::time::Duration;

use secrecy::SecretString;

use crate::errors::CoreError;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Rows fetched for the recent-transactions feed.
pub const DEFAULT_FEED_FETCH_LIMIT: usize = 6;
/// Feed items shown before "Show All" is toggled.
pub const DEFAULT_FEED_PREVIEW_LEN: usize = 3;
/// Rows fetched for the trade-history table.
pub const DEFAULT_TRADE_FETCH_LIMIT: usize = 100;

/// Connection and display settings for the dashboard.
///
/// The anon key never shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub supabase_url: String,

    /// Anonymous API key sent as `apikey` and bearer token
    pub supabase_anon_key: SecretString,

    pub geolocation_url: String,
    pub weather_url: String,

    pub feed_fetch_limit: usize,
    pub feed_preview_len: usize,
    pub trade_fetch_limit: usize,

    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl DashboardConfig {
    /// Build a config with default endpoints and limits.
    pub fn new(supabase_url: impl Into<String>, supabase_anon_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into().trim_end_matches('/').to_string(),
            supabase_anon_key: SecretString::from(supabase_anon_key.into()),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            feed_fetch_limit: DEFAULT_FEED_FETCH_LIMIT,
            feed_preview_len: DEFAULT_FEED_PREVIEW_LEN,
            trade_fetch_limit: DEFAULT_TRADE_FETCH_LIMIT,
            request_timeout: None,
        }
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists.
    ///
    /// Required: `SUPABASE_URL`, `SUPABASE_ANON_KEY`.
    /// Optional: `GEOLOCATION_URL`, `WEATHER_URL`, `DASHBOARD_REQUEST_TIMEOUT_SECS`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any key/value lookup (environment, JS globals, test maps).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| CoreError::Config(format!("Missing environment variable: {name}")))
        };

        let mut config = Self::new(required("SUPABASE_URL")?, required("SUPABASE_ANON_KEY")?);
        config.validate()?;

        if let Some(url) = lookup("GEOLOCATION_URL") {
            config.geolocation_url = url;
        }
        if let Some(url) = lookup("WEATHER_URL") {
            config.weather_url = url;
        }
        if let Some(raw) = lookup("DASHBOARD_REQUEST_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid DASHBOARD_REQUEST_TIMEOUT_SECS, requests stay unbounded"
                ),
            }
        }

        Ok(config)
    }

    /// Check that the project URL is usable as a PostgREST base.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.supabase_url.starts_with("https://") || self.supabase_url.starts_with("http://")) {
            return Err(CoreError::Config(format!(
                "SUPABASE_URL must start with http:// or https://, got '{}'",
                self.supabase_url
            )));
        }
        Ok(())
    }

    /// Base URL of the PostgREST API.
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }
}
