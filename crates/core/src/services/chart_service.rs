use crate::format::{format_grouped, to_fixed};
use crate::lifecycle::{settle, LoadState};
use crate::models::chart::{ChartBuckets, ChartDataPoint, ChartRow, TimePeriod};
use crate::providers::traits::DataSource;

/// Legend caption of the earnings series.
pub const EARNINGS_LEGEND: &str = "Trading Earnings";

/// Partition chart rows by their `period` label.
///
/// Rows keep the order the view returned them in (ascending by date); no
/// re-sort happens here. Rows whose label is not one of `day`, `week`,
/// `month`, `year` are dropped without a trace.
pub fn bucket_rows<I>(rows: I) -> ChartBuckets
where
    I: IntoIterator<Item = ChartRow>,
{
    let mut buckets = ChartBuckets::default();
    for row in rows {
        if let Some(period) = TimePeriod::from_label(&row.period) {
            buckets.get_mut(period).push(ChartDataPoint {
                date: row.date,
                earnings: row.earnings,
            });
        }
    }
    buckets
}

/// Y-axis tick label.
///
/// `0 → "0"`, `999 → "$999"`, `1500 → "$1.5K"`, `2500000 → "$2.5M"`,
/// `-1200 → "-$1.2K"`. The sign sits outside the dollar sign.
#[must_use]
pub fn format_y_axis_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1_000_000.0 {
        format!("{sign}${}M", to_fixed(abs / 1_000_000.0, 1))
    } else if abs >= 1_000.0 {
        format!("{sign}${}K", to_fixed(abs / 1_000.0, 1))
    } else {
        format!("{sign}${abs}")
    }
}

/// Tooltip value: dollar sign plus en-US grouping (`1234.5 → "$1,234.5"`).
#[must_use]
pub fn format_tooltip_value(value: f64) -> String {
    format!("${}", format_grouped(value))
}

/// The earnings chart panel: four series and the selected tab.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EarningsChart {
    state: LoadState<ChartBuckets>,
    active: TimePeriod,
}

impl EarningsChart {
    pub fn new(state: LoadState<ChartBuckets>) -> Self {
        Self {
            state,
            active: TimePeriod::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoadState<ChartBuckets> {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    #[must_use]
    pub fn active_period(&self) -> TimePeriod {
        self.active
    }

    /// Switch tabs by key. Unknown keys leave the current tab selected.
    pub fn select_tab(&mut self, key: &str) -> bool {
        match TimePeriod::from_label(key) {
            Some(period) => {
                self.active = period;
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, period: TimePeriod) {
        self.active = period;
    }

    /// Points of one period; empty while loading or after a failed fetch.
    #[must_use]
    pub fn series(&self, period: TimePeriod) -> &[ChartDataPoint] {
        match self.state.ready() {
            Some(buckets) => buckets.get(period),
            None => &[],
        }
    }

    #[must_use]
    pub fn active_series(&self) -> &[ChartDataPoint] {
        self.series(self.active)
    }
}

/// Loads the earnings chart from `chart_data_view`.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, source: &dyn DataSource) -> EarningsChart {
        let result = source.fetch_chart_rows().await.map(|rows| {
            let fetched = rows.len();
            let buckets = bucket_rows(rows);
            tracing::debug!(fetched, bucketed = buckets.total_len(), "chart data loaded");
            buckets
        });
        EarningsChart::new(settle("chart", result))
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
