use thiserror::Error;

/// Unified error type for the entire trade-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data source (PostgREST) ─────────────────────────────────────
    #[error("Data source error ({relation}): {message}")]
    DataSource {
        relation: String,
        message: String,
    },

    // ── Third-party API / Network ───────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; PostgREST filters and
        // coordinates live in the query string.
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip everything after the first `?` in an error message.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_query_string() {
        let msg = "error sending request for url (https://x.supabase.co/rest/v1/transactions?select=*)";
        assert_eq!(
            redact_query(msg),
            "error sending request for url (https://x.supabase.co/rest/v1/transactions?<query redacted>"
        );
    }

    #[test]
    fn leaves_plain_messages_alone() {
        assert_eq!(redact_query("connection refused"), "connection refused");
    }
}
