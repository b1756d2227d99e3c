//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Shown when geocoding returns no candidate.
pub const CITY_NOT_FOUND: &str = "City not found. Please try another city.";

/// Shown for every transport, status or parse failure of either lookup.
pub const FETCH_FAILED: &str = "Failed to fetch weather data. Please try again.";

/// City used when none is given on the command line.
pub const DEFAULT_CITY: &str = "San Francisco";

/// A geocoding match. Only `name` outlives the weather request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions returned by the forecast service
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
}

impl WeatherReading {
    /// Render as `"<number>°C"`, printing the number the shortest way that round-trips.
    /// Negative zero prints as `0`.
    pub fn display(&self) -> String {
        let t = self.temperature_celsius;
        let t = if t == 0.0 { 0.0 } else { t };
        format!("{t}°C")
    }
}

/// A displayed result: which city, and what it reads
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CityWeather {
    pub city_name: String,
    pub reading: WeatherReading,
}

/// Animation timing for the loading ellipsis and title gradient.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Form ---
    /// Text currently in the city input
    #[debug(section = "Form", label = "Query")]
    pub query: String,

    // --- Result panel ---
    /// Panel lifecycle: Empty (idle) → Loading → Loaded (result) / Failed (error)
    #[debug(section = "Panel", label = "Weather", debug_fmt)]
    pub weather: DataResource<CityWeather>,

    /// City shown in the panel heading; updated as soon as geocoding resolves
    #[debug(section = "Panel", label = "City")]
    pub city_name: String,

    /// Most recent successful result, kept across later failures
    #[debug(section = "Panel", label = "Last result", debug_fmt)]
    pub last_result: Option<CityWeather>,

    /// Sequence number of the latest accepted submission
    #[debug(section = "Requests", label = "Sequence")]
    pub request_seq: u64,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with the form pre-filled with `city`
    pub fn new(city: impl Into<String>) -> Self {
        let city = city.into();
        Self {
            query: city.clone(),
            weather: DataResource::Empty,
            city_name: city,
            last_result: None,
            request_seq: 0,
            tick_count: 0,
        }
    }

    /// True between an accepted submission and its terminal outcome
    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }

    /// Message currently shown in place of the result, if any
    pub fn error(&self) -> Option<&str> {
        self.weather.error()
    }

    /// Temperature currently displayed, if any
    pub fn temperature(&self) -> Option<f64> {
        self.weather.data().map(|w| w.reading.temperature_celsius)
    }

    /// Whether `seq` belongs to the latest submission
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.request_seq
    }

    pub fn loading_anim_active(&self) -> bool {
        self.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}
