#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::lifecycle::settle;
#[cfg(not(target_arch = "wasm32"))]
use crate::lifecycle::MountHandle;
#[cfg(not(target_arch = "wasm32"))]
use crate::models::widget::ClockFace;
use crate::models::widget::WidgetData;
use crate::providers::traits::{GeoLocator, WeatherProvider};

/// Looks up location and temperature for the header widget.
pub struct WidgetService;

impl WidgetService {
    pub fn new() -> Self {
        Self
    }

    /// Location first, then weather at its coordinates. Weather is skipped
    /// when the location carries no coordinates. Any failure collapses the
    /// whole widget to its "Unavailable" fallback.
    pub async fn load(
        &self,
        locator: &dyn GeoLocator,
        weather: &dyn WeatherProvider,
    ) -> WidgetData {
        settle("location widget", Self::lookup(locator, weather).await).into()
    }

    async fn lookup(
        locator: &dyn GeoLocator,
        weather: &dyn WeatherProvider,
    ) -> Result<WidgetData, CoreError> {
        let location = locator.locate().await?;
        let temperature = match location.coordinates() {
            Some((latitude, longitude)) => {
                weather.current_temperature(latitude, longitude).await?
            }
            None => None,
        };
        Ok(WidgetData::from_lookup(&location, temperature))
    }
}

impl Default for WidgetService {
    fn default() -> Self {
        Self::new()
    }
}

/// Call `on_tick` with the local wall-clock once a second until the
/// owning mount is torn down. The first tick fires immediately.
#[cfg(not(target_arch = "wasm32"))]
pub async fn run_clock<F>(handle: &MountHandle, mut on_tick: F)
where
    F: FnMut(ClockFace),
{
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            biased;
            _ = handle.cancelled() => break,
            _ = interval.tick() => on_tick(ClockFace::at(&chrono::Local::now())),
        }
    }
}
