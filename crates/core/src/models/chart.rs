use serde::{Deserialize, Serialize};

use super::de::f64_lenient;
use crate::errors::CoreError;

/// Time granularity of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Day,
        TimePeriod::Week,
        TimePeriod::Month,
        TimePeriod::Year,
    ];

    /// Parse the period label used by `chart_data_view` and the tab keys.
    /// Matching is exact; anything else is not a period.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "day" => Some(TimePeriod::Day),
            "week" => Some(TimePeriod::Week),
            "month" => Some(TimePeriod::Month),
            "year" => Some(TimePeriod::Year),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
        }
    }

    /// Tab caption ("DAY", "WEEK", ...).
    #[must_use]
    pub fn tab_label(&self) -> &'static str {
        match self {
            TimePeriod::Day => "DAY",
            TimePeriod::Week => "WEEK",
            TimePeriod::Month => "MONTH",
            TimePeriod::Year => "YEAR",
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| CoreError::InvalidValue(format!("unknown time period '{s}'")))
    }
}

/// A raw row of `chart_data_view`.
///
/// `period` is kept as text: unknown labels must survive deserialization so
/// bucketing can drop them quietly instead of failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub date: String,
    pub period: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub earnings: f64,
}

/// A single point of the earnings chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// X-axis label, as supplied by the view
    pub date: String,

    /// Trading earnings for the bucket; negative on a losing period
    pub earnings: f64,
}

/// Chart series partitioned by period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartBuckets {
    pub day: Vec<ChartDataPoint>,
    pub week: Vec<ChartDataPoint>,
    pub month: Vec<ChartDataPoint>,
    pub year: Vec<ChartDataPoint>,
}

impl ChartBuckets {
    #[must_use]
    pub fn get(&self, period: TimePeriod) -> &[ChartDataPoint] {
        match period {
            TimePeriod::Day => &self.day,
            TimePeriod::Week => &self.week,
            TimePeriod::Month => &self.month,
            TimePeriod::Year => &self.year,
        }
    }

    pub fn get_mut(&mut self, period: TimePeriod) -> &mut Vec<ChartDataPoint> {
        match period {
            TimePeriod::Day => &mut self.day,
            TimePeriod::Week => &mut self.week,
            TimePeriod::Month => &mut self.month,
            TimePeriod::Year => &mut self.year,
        }
    }

    /// Number of points across all four buckets.
    #[must_use]
    pub fn total_len(&self) -> usize {
        TimePeriod::ALL.iter().map(|p| self.get(*p).len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}
