//! Open-Meteo API client

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::state::{ResolvedLocation, WeatherReading};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";

/// Client errors. Geocoding misses are not errors; see [`OpenMeteoClient::geocode`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

/// Endpoint configuration, injectable so tests can point at a mock server
#[derive(Clone, Debug, PartialEq)]
pub struct OpenMeteoConfig {
    /// Geocoding API base, without the `/search` path
    pub geocoding_base_url: String,
    /// Forecast API base, without the `/forecast` path
    pub forecast_base_url: String,
    /// Whole-request timeout; `None` leaves reqwest's default (no timeout)
    pub timeout: Option<Duration>,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_base_url: DEFAULT_FORECAST_URL.to_string(),
            timeout: None,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
}

// ============================================================================
// Client
// ============================================================================

/// Open-Meteo HTTP client. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct OpenMeteoClient {
    http: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &OpenMeteoConfig {
        &self.config
    }

    /// URL for a single-match English geocoding lookup
    pub fn geocoding_url(&self, query: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.config.geocoding_base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }

    /// URL for the current temperature at the given coordinates
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m",
            self.config.forecast_base_url.trim_end_matches('/'),
            latitude,
            longitude
        )
    }

    /// Resolve a place name to its first match, or `None` when nothing matches
    pub async fn geocode(&self, query: &str) -> Result<Option<ResolvedLocation>, ApiError> {
        let data: GeocodingResponse = self.get_json(&self.geocoding_url(query)).await?;

        Ok(data
            .results
            .and_then(|results| results.into_iter().next())
            .map(|first| ResolvedLocation {
                name: first.name,
                latitude: first.latitude,
                longitude: first.longitude,
            }))
    }

    /// Fetch the current temperature (°C) at the given coordinates
    pub async fn current_temperature(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReading, ApiError> {
        let data: ForecastResponse = self.get_json(&self.forecast_url(latitude, longitude)).await?;

        let temperature_celsius = data
            .current
            .and_then(|current| current.temperature_2m)
            .ok_or(ApiError::MissingField("current.temperature_2m"))?;

        Ok(WeatherReading {
            temperature_celsius,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = %url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
