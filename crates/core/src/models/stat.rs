use serde::{Deserialize, Serialize};

use super::de::id_lenient;

/// Colour intent of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatIntent {
    Positive,
    Negative,
    Neutral,
    Warning,
}

/// Trend arrow of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatDirection {
    Up,
    Down,
    #[default]
    Neutral,
}

/// One key metric from `dashboard_stats_view`.
///
/// Every field is computed by the view; the client only renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStat {
    #[serde(deserialize_with = "id_lenient")]
    pub id: String,

    pub label: String,

    /// Already formatted for display (e.g. "$12,430", "64%")
    pub value: String,

    #[serde(default)]
    pub description: String,

    pub intent: StatIntent,

    /// Icon key understood by the front end ("gear", "proccesor", "boom")
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub direction: StatDirection,
}

/// The single row of `system_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Raw timestamp of the last data refresh
    pub last_updated: String,
}
