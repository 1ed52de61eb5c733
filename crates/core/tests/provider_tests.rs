// ═══════════════════════════════════════════════════════════════════
// Provider Tests — PostgREST queries, response decoding, config
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use trade_dashboard_core::config::DashboardConfig;
use trade_dashboard_core::errors::CoreError;
use trade_dashboard_core::models::trade::{TradeSide, TransactionRow};
use trade_dashboard_core::models::widget::{GeoLocation, WidgetData};
use trade_dashboard_core::providers::ipapi::{parse_location, IpApiLocator};
use trade_dashboard_core::providers::open_meteo::{parse_temperature, OpenMeteoProvider};
use trade_dashboard_core::providers::query::ViewQuery;
use trade_dashboard_core::providers::supabase::{decode_rows, error_from_response, SupabaseClient};
use trade_dashboard_core::providers::traits::{DataSource, GeoLocator, WeatherProvider};

const REST: &str = "https://demo.supabase.co/rest/v1";

fn pairs(q: &ViewQuery) -> Vec<(String, String)> {
    q.query_pairs()
}

fn p(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

// ═══════════════════════════════════════════════════════════════════
// ViewQuery
// ═══════════════════════════════════════════════════════════════════

mod view_query {
    use super::*;

    #[test]
    fn plain_select() {
        let q = ViewQuery::from("transactions");
        assert_eq!(q.relation(), "transactions");
        assert_eq!(pairs(&q), vec![p("select", "*")]);
        assert!(!q.is_single());
    }

    #[test]
    fn recent_transactions() {
        let q = ViewQuery::recent_transactions(6);
        assert_eq!(
            pairs(&q),
            vec![p("select", "*"), p("order", "time.desc"), p("limit", "6")]
        );
        assert_eq!(
            q.url(REST),
            "https://demo.supabase.co/rest/v1/transactions?select=*&order=time.desc&limit=6"
        );
    }

    #[test]
    fn trade_history_limit() {
        let q = ViewQuery::recent_transactions(100);
        assert!(pairs(&q).contains(&p("limit", "100")));
    }

    #[test]
    fn dashboard_stats() {
        let q = ViewQuery::dashboard_stats();
        assert_eq!(q.relation(), "dashboard_stats_view");
        assert_eq!(pairs(&q), vec![p("select", "*"), p("order", "sort_order.asc")]);
    }

    #[test]
    fn chart_data() {
        let q = ViewQuery::chart_data();
        assert_eq!(q.relation(), "chart_data_view");
        assert_eq!(pairs(&q), vec![p("select", "*"), p("order", "sort_date.asc")]);
    }

    #[test]
    fn system_status_is_single() {
        let q = ViewQuery::system_status();
        assert!(q.is_single());
        assert_eq!(
            q.url(REST),
            "https://demo.supabase.co/rest/v1/system_status?select=last_updated&limit=1"
        );
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let q = ViewQuery::from("x");
        assert_eq!(q.url("https://a.b/rest/v1/"), "https://a.b/rest/v1/x?select=*");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Supabase responses
// ═══════════════════════════════════════════════════════════════════

mod supabase {
    use super::*;

    #[test]
    fn decodes_row_array() {
        let body = r#"[
            {"id":"1","symbol":"BTC","type":"BUY","quantity":1.5,"price":42000.125,
             "transaction_fee":1.25,"time":"2025-01-15T10:30:00+00:00"},
            {"id":"2","symbol":"ETH","type":"SELL","quantity":"3","price":"2500",
             "transaction_fee":"0.5","time":"2025-01-14T09:00:00+00:00"}
        ]"#;
        let rows: Vec<TransactionRow> = decode_rows("transactions", body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].side, TradeSide::Sell);
        assert_eq!(rows[1].quantity, 3.0);
    }

    #[test]
    fn decodes_empty_array() {
        let rows: Vec<TransactionRow> = decode_rows("transactions", "[]").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn decode_error_names_relation() {
        let err = decode_rows::<TransactionRow>("transactions", r#"[{"id":"1"}]"#).unwrap_err();
        match err {
            CoreError::Deserialization(msg) => assert!(msg.starts_with("transactions: ")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn postgrest_error_body() {
        let body = r#"{"code":"42P01","details":null,"hint":null,
                       "message":"relation \"public.chart_data_view\" does not exist"}"#;
        let err = error_from_response("chart_data_view", StatusCode::NOT_FOUND, body);
        match err {
            CoreError::DataSource { relation, message } => {
                assert_eq!(relation, "chart_data_view");
                assert_eq!(
                    message,
                    "relation \"public.chart_data_view\" does not exist [42P01, HTTP 404]"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn postgrest_error_with_details() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,
                       "message":"JSON object requested, multiple (or no) rows returned"}"#;
        let err = error_from_response("system_status", StatusCode::NOT_ACCEPTABLE, body);
        assert_eq!(
            err.to_string(),
            "Data source error (system_status): JSON object requested, multiple (or no) rows \
             returned: The result contains 0 rows [PGRST116, HTTP 406]"
        );
    }

    #[test]
    fn empty_error_body() {
        let err = error_from_response("transactions", StatusCode::INTERNAL_SERVER_ERROR, "  ");
        assert_eq!(
            err.to_string(),
            "Data source error (transactions): HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn plain_text_error_body() {
        let err = error_from_response("transactions", StatusCode::BAD_GATEWAY, "bad gateway\n");
        assert_eq!(
            err.to_string(),
            "Data source error (transactions): HTTP 502: bad gateway"
        );
    }

    #[test]
    fn client_builds_rest_url() {
        let config = DashboardConfig::new("https://demo.supabase.co/", "anon-key");
        let client = SupabaseClient::new(&config).unwrap();
        assert_eq!(client.rest_url(), REST);
        assert_eq!(client.name(), "Supabase");
    }

    #[test]
    fn client_rejects_bad_url() {
        let config = DashboardConfig::new("demo.supabase.co", "anon-key");
        assert!(matches!(SupabaseClient::new(&config), Err(CoreError::Config(_))));
    }

    #[test]
    fn client_rejects_unprintable_key() {
        let config = DashboardConfig::new("https://demo.supabase.co", "bad\nkey");
        match SupabaseClient::new(&config) {
            Err(CoreError::Config(msg)) => assert!(msg.starts_with("Invalid SUPABASE_ANON_KEY")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// ipapi / Open-Meteo
// ═══════════════════════════════════════════════════════════════════

mod third_party {
    use super::*;

    #[test]
    fn ipapi_full_body() {
        let body = r#"{"ip":"1.2.3.4","city":"Berlin","country_name":"Germany",
                       "timezone":"Europe/Berlin","latitude":52.52,"longitude":13.405}"#;
        let loc = parse_location(body).unwrap();
        assert_eq!(loc.city.as_deref(), Some("Berlin"));
        assert_eq!(loc.coordinates(), Some((52.52, 13.405)));
    }

    #[test]
    fn ipapi_error_body_is_an_empty_location() {
        let body = r#"{"error":true,"reason":"RateLimited","message":"Visit https://ipapi.co"}"#;
        let loc = parse_location(body).unwrap();
        assert_eq!(loc, GeoLocation::default());
        assert_eq!(loc.coordinates(), None);

        let shown = WidgetData::from_lookup(&loc, None);
        assert_eq!(shown.location, "Unknown, ");
        assert_eq!(shown.timezone, "UTC");
        assert_eq!(shown.temperature, "--°C");
    }

    #[test]
    fn ipapi_garbage() {
        assert!(matches!(
            parse_location("<html>"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn open_meteo_temperature() {
        let body = r#"{"latitude":52.52,"current":{"time":"2025-01-15T10:30","temperature_2m":21.4}}"#;
        assert_eq!(parse_temperature(body).unwrap(), Some(21.4));
    }

    #[test]
    fn open_meteo_missing_reading() {
        assert_eq!(parse_temperature(r#"{"current":{}}"#).unwrap(), None);
        assert_eq!(parse_temperature("{}").unwrap(), None);
    }

    #[test]
    fn open_meteo_error_body_has_no_reading() {
        let body = r#"{"error":true,"reason":"Latitude must be in range of -90 to 90°. Given: 91.0."}"#;
        assert_eq!(parse_temperature(body).unwrap(), None);
    }

    #[test]
    fn open_meteo_garbage() {
        assert!(matches!(
            parse_temperature("oops"),
            Err(CoreError::Api { .. })
        ));
    }

    #[test]
    fn provider_names() {
        assert_eq!(IpApiLocator::new().name(), "ipapi");
        assert_eq!(OpenMeteoProvider::new().name(), "Open-Meteo");
    }
}

// ═══════════════════════════════════════════════════════════════════
// DashboardConfig
// ═══════════════════════════════════════════════════════════════════

mod config {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const BASE: [(&str, &str); 2] = [
        ("SUPABASE_URL", "https://demo.supabase.co/"),
        ("SUPABASE_ANON_KEY", "anon-key"),
    ];

    #[test]
    fn defaults() {
        let cfg = DashboardConfig::from_lookup(lookup(&BASE)).unwrap();
        assert_eq!(cfg.supabase_url, "https://demo.supabase.co");
        assert_eq!(cfg.rest_url(), REST);
        assert_eq!(cfg.feed_fetch_limit, 6);
        assert_eq!(cfg.feed_preview_len, 3);
        assert_eq!(cfg.trade_fetch_limit, 100);
        assert_eq!(cfg.geolocation_url, "https://ipapi.co/json/");
        assert_eq!(cfg.weather_url, "https://api.open-meteo.com/v1/forecast");
        assert_eq!(cfg.request_timeout, None);
    }

    #[test]
    fn missing_url() {
        let err = DashboardConfig::from_lookup(lookup(&[("SUPABASE_ANON_KEY", "k")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: SUPABASE_URL"
        );
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = DashboardConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(err.to_string().ends_with("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let err = DashboardConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "k"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn optional_overrides() {
        let mut vars = BASE.to_vec();
        vars.push(("GEOLOCATION_URL", "http://localhost:9000/geo"));
        vars.push(("WEATHER_URL", "http://localhost:9000/weather"));
        vars.push(("DASHBOARD_REQUEST_TIMEOUT_SECS", "15"));
        let cfg = DashboardConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.geolocation_url, "http://localhost:9000/geo");
        assert_eq!(cfg.weather_url, "http://localhost:9000/weather");
        assert_eq!(cfg.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let mut vars = BASE.to_vec();
        vars.push(("DASHBOARD_REQUEST_TIMEOUT_SECS", "soon"));
        let cfg = DashboardConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.request_timeout, None);
    }

    #[test]
    fn zero_timeout_is_ignored() {
        let mut vars = BASE.to_vec();
        vars.push(("DASHBOARD_REQUEST_TIMEOUT_SECS", "0"));
        let cfg = DashboardConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.request_timeout, None);
    }

    #[test]
    fn debug_does_not_leak_key() {
        let cfg = DashboardConfig::new("https://demo.supabase.co", "super-secret-anon-key");
        assert!(!format!("{cfg:?}").contains("super-secret-anon-key"));
    }
}
