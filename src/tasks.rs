//! Async task bodies: run one effect against the API and map the outcome to
//! exactly one result action. The binary spawns these under fixed task keys.

use tracing::{error, info, warn};

use crate::action::Action;
use crate::api::OpenMeteoClient;
use crate::effect::Effect;

pub const GEOCODE_TASK: &str = "geocode";
pub const WEATHER_TASK: &str = "weather";

/// Task key an effect is spawned under. Respawning a key replaces the older task.
pub fn task_key(effect: &Effect) -> &'static str {
    match effect {
        Effect::ResolveCity { .. } => GEOCODE_TASK,
        Effect::FetchWeather { .. } => WEATHER_TASK,
    }
}

/// Run an effect to completion
pub async fn run(client: OpenMeteoClient, effect: Effect) -> Action {
    match effect {
        Effect::ResolveCity { seq, query } => resolve_city(&client, seq, &query).await,
        Effect::FetchWeather {
            seq,
            city,
            latitude,
            longitude,
        } => load_weather(&client, seq, &city, latitude, longitude).await,
    }
}

pub async fn resolve_city(client: &OpenMeteoClient, seq: u64, query: &str) -> Action {
    match client.geocode(query).await {
        Ok(Some(location)) => Action::GeocodeDidResolve { seq, location },
        Ok(None) => {
            warn!(seq, query, "no geocoding match");
            Action::GeocodeDidNotFind { seq }
        }
        Err(e) => {
            error!(seq, query, error = %e, "geocoding lookup failed");
            Action::WeatherDidError {
                seq,
                message: e.to_string(),
            }
        }
    }
}

pub async fn load_weather(
    client: &OpenMeteoClient,
    seq: u64,
    city: &str,
    latitude: f64,
    longitude: f64,
) -> Action {
    match client.current_temperature(latitude, longitude).await {
        Ok(reading) => {
            info!(
                seq,
                city,
                latitude,
                longitude,
                temperature = reading.temperature_celsius,
                "current temperature loaded"
            );
            Action::WeatherDidLoad { seq, reading }
        }
        Err(e) => {
            error!(seq, city, latitude, longitude, error = %e, "weather lookup failed");
            Action::WeatherDidError {
                seq,
                message: e.to_string(),
            }
        }
    }
}
