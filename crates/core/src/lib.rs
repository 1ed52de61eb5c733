pub mod config;
pub mod errors;
pub mod format;
pub mod lifecycle;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use config::DashboardConfig;
use errors::CoreError;
use models::widget::WidgetData;
use providers::{
    ipapi::IpApiLocator,
    open_meteo::OpenMeteoProvider,
    supabase::SupabaseClient,
    traits::{DataSource, GeoLocator, WeatherProvider},
};
use services::{
    chart_service::{ChartService, EarningsChart},
    feed_service::{FeedService, TransactionFeed},
    overview_service::{OverviewPanel, OverviewService},
    trade_service::{TradeService, TradeTable},
    widget_service::WidgetService,
};

/// Main entry point for the trading dashboard core library.
///
/// Holds the one data-source client for the process and hands it to every
/// panel load. Each `load_*` call issues its own fetch and always returns a
/// displayable panel; failures are logged and turned into empty or
/// placeholder states rather than errors.
#[must_use]
pub struct TradingDashboard {
    source: Arc<dyn DataSource>,
    locator: Arc<dyn GeoLocator>,
    weather: Arc<dyn WeatherProvider>,
    overview_service: OverviewService,
    chart_service: ChartService,
    feed_service: FeedService,
    trade_service: TradeService,
    widget_service: WidgetService,
}

impl std::fmt::Debug for TradingDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingDashboard")
            .field("source", &self.source.name())
            .field("locator", &self.locator.name())
            .field("weather", &self.weather.name())
            .finish()
    }
}

impl TradingDashboard {
    /// Connect to the configured Supabase project and the default
    /// geolocation and weather services.
    pub fn connect(config: &DashboardConfig) -> Result<Self, CoreError> {
        let source = SupabaseClient::new(config)?;
        let locator = IpApiLocator::with_url(config.geolocation_url.clone(), config.request_timeout);
        let weather = OpenMeteoProvider::with_url(config.weather_url.clone(), config.request_timeout);

        Ok(Self::with_sources(Arc::new(source), Arc::new(locator), Arc::new(weather))
            .with_limits(
                config.feed_fetch_limit,
                config.feed_preview_len,
                config.trade_fetch_limit,
            ))
    }

    /// Read configuration from the environment (and `.env`) and connect.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, CoreError> {
        Self::connect(&DashboardConfig::from_env()?)
    }

    /// Build a dashboard over already constructed sources, with default limits.
    pub fn with_sources(
        source: Arc<dyn DataSource>,
        locator: Arc<dyn GeoLocator>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            source,
            locator,
            weather,
            overview_service: OverviewService::new(),
            chart_service: ChartService::new(),
            feed_service: FeedService::default(),
            trade_service: TradeService::default(),
            widget_service: WidgetService::new(),
        }
    }

    /// Override feed and table row limits.
    pub fn with_limits(mut self, feed_fetch: usize, feed_preview: usize, trade_fetch: usize) -> Self {
        self.feed_service = FeedService::new(feed_fetch, feed_preview);
        self.trade_service = TradeService::new(trade_fetch);
        self
    }

    /// The shared data-source client.
    #[must_use]
    pub fn data_source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    // ── Panels ──────────────────────────────────────────────────────

    /// Stat cards and "last updated" header.
    pub async fn load_overview(&self) -> OverviewPanel {
        self.overview_service.load(self.source.as_ref()).await
    }

    /// Earnings chart with all four period buckets.
    pub async fn load_chart(&self) -> EarningsChart {
        self.chart_service.load(self.source.as_ref()).await
    }

    /// Recent-transactions feed.
    pub async fn load_recent_transactions(&self) -> TransactionFeed {
        self.feed_service.load(self.source.as_ref()).await
    }

    /// Sortable trade-history table.
    pub async fn load_trade_table(&self) -> TradeTable {
        self.trade_service.load(self.source.as_ref()).await
    }

    /// Location, timezone and temperature for the header widget.
    pub async fn load_widget(&self) -> WidgetData {
        self.widget_service
            .load(self.locator.as_ref(), self.weather.as_ref())
            .await
    }
}
