use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chart::ChartRow;
use crate::models::stat::{DashboardStat, SystemStatus};
use crate::models::trade::TransactionRow;
use crate::models::widget::GeoLocation;

/// Read-only access to the hosted data store.
///
/// One implementation talks PostgREST; tests plug in in-memory sources.
/// Panels only ever see this trait, so the store can be swapped without
/// touching display logic.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DataSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Rows of `dashboard_stats_view`, ordered by their sort key.
    async fn fetch_dashboard_stats(&self) -> Result<Vec<DashboardStat>, CoreError>;

    /// Rows of `chart_data_view`, ascending by date.
    async fn fetch_chart_rows(&self) -> Result<Vec<ChartRow>, CoreError>;

    /// The `limit` most recent rows of `transactions`, newest first.
    async fn fetch_transactions(&self, limit: usize) -> Result<Vec<TransactionRow>, CoreError>;

    /// The single `system_status` row.
    async fn fetch_system_status(&self) -> Result<SystemStatus, CoreError>;
}

/// Resolves the viewer's approximate location.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait GeoLocator: Send + Sync {
    fn name(&self) -> &str;

    async fn locate(&self) -> Result<GeoLocation, CoreError>;
}

/// Current air temperature at a coordinate.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Temperature in °C, or `None` when the service has no reading.
    async fn current_temperature(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<f64>, CoreError>;
}
