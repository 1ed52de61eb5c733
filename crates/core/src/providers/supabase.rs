use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::query::ViewQuery;
use super::traits::DataSource;
use crate::config::DashboardConfig;
use crate::errors::CoreError;
use crate::models::chart::ChartRow;
use crate::models::stat::{DashboardStat, SystemStatus};
use crate::models::trade::TransactionRow;

/// `Accept` value that makes PostgREST return one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Read-only PostgREST client for the hosted Supabase project.
///
/// - **Auth**: anon key, sent as `apikey` and as a bearer token.
/// - **Endpoints**: `/rest/v1/{relation}?select=..&order=..&limit=..`
///
/// Build one per process and share it; it wraps a pooled `reqwest::Client`.
pub struct SupabaseClient {
    client: Client,
    rest_url: String,
}

impl SupabaseClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let key = config.supabase_anon_key.expose_secret();
        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header(key)?);
        headers.insert(AUTHORIZATION, sensitive_header(&format!("Bearer {key}"))?);

        let builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        Ok(Self {
            client: builder.build()?,
            rest_url: config.rest_url(),
        })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Run a query and decode the row array.
    pub async fn select<T: DeserializeOwned>(&self, query: &ViewQuery) -> Result<Vec<T>, CoreError> {
        let body = self.execute(query).await?;
        decode_rows(query.relation(), &body)
    }

    /// Run a `single()` query and decode the one row.
    pub async fn select_single<T: DeserializeOwned>(&self, query: &ViewQuery) -> Result<T, CoreError> {
        let query = if query.is_single() {
            query.clone()
        } else {
            query.clone().single()
        };
        let body = self.execute(&query).await?;
        serde_json::from_str(&body).map_err(|e| {
            CoreError::Deserialization(format!("{}: {e}", query.relation()))
        })
    }

    async fn execute(&self, query: &ViewQuery) -> Result<String, CoreError> {
        let url = format!("{}/{}", self.rest_url, query.relation());
        let mut request = self.client.get(&url).query(&query.query_pairs());
        if query.is_single() {
            request = request.header(ACCEPT, SINGLE_OBJECT);
        }

        tracing::debug!(relation = query.relation(), "querying data source");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(query.relation(), status, &body));
        }
        Ok(body)
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, CoreError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| CoreError::Config(format!("Invalid SUPABASE_ANON_KEY: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

// ── PostgREST response types ────────────────────────────────────────

/// Error body PostgREST sends with any non-2xx status.
#[derive(Debug, Deserialize)]
pub struct PostgrestError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Decode a JSON row array returned for `relation`.
pub fn decode_rows<T: DeserializeOwned>(relation: &str, body: &str) -> Result<Vec<T>, CoreError> {
    serde_json::from_str(body)
        .map_err(|e| CoreError::Deserialization(format!("{relation}: {e}")))
}

/// Turn a failed response into a `DataSource` error, keeping PostgREST's
/// own message and code when the body has them.
#[must_use]
pub fn error_from_response(relation: &str, status: StatusCode, body: &str) -> CoreError {
    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            message: Some(message),
            code,
            details,
            ..
        }) => {
            let mut text = message;
            if let Some(details) = details.filter(|d| !d.is_empty()) {
                text.push_str(&format!(": {details}"));
            }
            match code {
                Some(code) => format!("{text} [{code}, HTTP {}]", status.as_u16()),
                None => format!("{text} [HTTP {}]", status.as_u16()),
            }
        }
        _ if body.trim().is_empty() => format!("HTTP {status}"),
        _ => format!("HTTP {}: {}", status.as_u16(), body.trim()),
    };
    CoreError::DataSource {
        relation: relation.to_string(),
        message,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DataSource for SupabaseClient {
    fn name(&self) -> &str {
        "Supabase"
    }

    async fn fetch_dashboard_stats(&self) -> Result<Vec<DashboardStat>, CoreError> {
        self.select(&ViewQuery::dashboard_stats()).await
    }

    async fn fetch_chart_rows(&self) -> Result<Vec<ChartRow>, CoreError> {
        self.select(&ViewQuery::chart_data()).await
    }

    async fn fetch_transactions(&self, limit: usize) -> Result<Vec<TransactionRow>, CoreError> {
        self.select(&ViewQuery::recent_transactions(limit)).await
    }

    async fn fetch_system_status(&self) -> Result<SystemStatus, CoreError> {
        self.select_single(&ViewQuery::system_status()).await
    }
}
