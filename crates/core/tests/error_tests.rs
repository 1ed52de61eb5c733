// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use trade_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn data_source() {
        let err = CoreError::DataSource {
            relation: "transactions".into(),
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "Data source error (transactions): permission denied"
        );
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "ipapi".into(),
            message: "RateLimited".into(),
        };
        assert_eq!(err.to_string(), "API error (ipapi): RateLimited");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("missing field `symbol`".into());
        assert_eq!(
            err.to_string(),
            "Deserialization error: missing field `symbol`"
        );
    }

    #[test]
    fn config() {
        let err = CoreError::Config("Missing environment variable: SUPABASE_URL".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: SUPABASE_URL"
        );
    }

    #[test]
    fn invalid_value() {
        let err = CoreError::InvalidValue("NaN".into());
        assert_eq!(err.to_string(), "Invalid value: NaN");
    }

    #[test]
    fn empty_message() {
        let err = CoreError::Network(String::new());
        assert_eq!(err.to_string(), "Network error: ");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts_json_errors() {
        fn parse(raw: &str) -> Result<Vec<String>, CoreError> {
            Ok(serde_json::from_str(raw)?)
        }
        assert!(matches!(parse("{"), Err(CoreError::Deserialization(_))));
        assert_eq!(parse("[\"a\"]").unwrap(), vec!["a".to_string()]);
    }
}

// ── Trait behaviour ─────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CoreError>();
    }

    #[test]
    fn debug_names_variant() {
        let err = CoreError::Config("x".into());
        assert!(format!("{err:?}").starts_with("Config("));
    }
}
