use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::lifecycle::LoadState;

pub const LOADING_LABEL: &str = "Loading...";
pub const UNAVAILABLE_LABEL: &str = "Unavailable";
pub const UNKNOWN_CITY: &str = "Unknown";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const NO_TEMPERATURE: &str = "--°C";

/// Where the viewer is, as reported by the IP geolocation service.
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub country_name: Option<String>,

    #[serde(default)]
    pub timezone: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl GeoLocation {
    /// Both coordinates, when the service returned them.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Text shown in the location widget footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetData {
    /// "City, Country"
    pub location: String,
    pub timezone: String,
    /// "21.4°C" or "--°C"
    pub temperature: String,
}

impl WidgetData {
    /// Placeholder while the lookups are running.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            location: LOADING_LABEL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            temperature: NO_TEMPERATURE.to_string(),
        }
    }

    /// Fallback when any lookup failed.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            location: UNAVAILABLE_LABEL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            temperature: NO_TEMPERATURE.to_string(),
        }
    }

    /// Build the display from a location and an optional temperature.
    #[must_use]
    pub fn from_lookup(location: &GeoLocation, temperature: Option<f64>) -> Self {
        let city = location
            .city
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_CITY);
        let country = location.country_name.as_deref().unwrap_or("");
        let timezone = location
            .timezone
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE);

        Self {
            location: format!("{city}, {country}"),
            timezone: timezone.to_string(),
            temperature: temperature
                .map(|t| format!("{t}°C"))
                .unwrap_or_else(|| NO_TEMPERATURE.to_string()),
        }
    }
}

/// Widget text for each load state: placeholder while the lookups run,
/// fallback once they failed.
impl From<LoadState<WidgetData>> for WidgetData {
    fn from(state: LoadState<WidgetData>) -> Self {
        match state {
            LoadState::Loading => WidgetData::loading(),
            LoadState::Ready(data) => data,
            LoadState::Failed => WidgetData::unavailable(),
        }
    }
}

/// Wall-clock text of the widget header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockFace {
    /// "Friday"
    pub day_of_week: String,
    /// "October 16, 2026"
    pub date: String,
    /// "3:05 PM"
    pub time: String,
}

impl ClockFace {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            day_of_week: now.format("%A").to_string(),
            date: now.format("%B %-d, %Y").to_string(),
            time: now.format("%-I:%M %p").to_string(),
        }
    }
}
