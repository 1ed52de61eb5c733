use crate::format::format_timestamp;
use crate::lifecycle::{settle, LoadState};
use crate::models::stat::DashboardStat;
use crate::models::widget::LOADING_LABEL;
use crate::providers::traits::DataSource;

/// Shown when the refresh time could not be fetched.
pub const UNKNOWN_LAST_UPDATED: &str = "Unknown";

/// The overview header and stat cards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverviewPanel {
    stats: LoadState<Vec<DashboardStat>>,
    last_updated: LoadState<String>,
}

impl OverviewPanel {
    pub fn new(stats: LoadState<Vec<DashboardStat>>, last_updated: LoadState<String>) -> Self {
        Self {
            stats,
            last_updated,
        }
    }

    #[must_use]
    pub fn stats_state(&self) -> &LoadState<Vec<DashboardStat>> {
        &self.stats
    }

    /// Stat cards in view order; empty unless loaded.
    #[must_use]
    pub fn stats(&self) -> &[DashboardStat] {
        self.stats.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.stats.is_loading()
    }

    /// `"Loading..."`, the formatted refresh time, or `"Unknown"`.
    #[must_use]
    pub fn last_updated_label(&self) -> &str {
        match &self.last_updated {
            LoadState::Loading => LOADING_LABEL,
            LoadState::Ready(label) => label,
            LoadState::Failed => UNKNOWN_LAST_UPDATED,
        }
    }

    #[must_use]
    pub fn header_description(&self) -> String {
        format!("Last updated {}", self.last_updated_label())
    }
}

/// Loads the stat cards and the last refresh time.
pub struct OverviewService;

impl OverviewService {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, source: &dyn DataSource) -> OverviewPanel {
        let stats = settle("dashboard stats", source.fetch_dashboard_stats().await);
        let last_updated = settle(
            "system status",
            source
                .fetch_system_status()
                .await
                .map(|status| format_timestamp(&status.last_updated)),
        );
        OverviewPanel::new(stats, last_updated)
    }
}

impl Default for OverviewService {
    fn default() -> Self {
        Self::new()
    }
}
