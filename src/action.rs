//! Actions - user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{ResolvedLocation, WeatherReading};

/// Application actions with automatic category inference.
///
/// Result actions carry the `seq` of the submission that started them so the
/// reducer can drop answers to superseded submissions.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query category =====
    /// Input text changed
    QueryChange(String),

    /// Form submitted with the given text (triggers the lookup chain)
    QuerySubmit(String),

    // ===== Geocode category =====
    /// Result: first geocoding match
    GeocodeDidResolve { seq: u64, location: ResolvedLocation },

    /// Result: geocoding returned no candidate
    GeocodeDidNotFind { seq: u64 },

    // ===== Weather category =====
    /// Result: current temperature loaded
    WeatherDidLoad { seq: u64, reading: WeatherReading },

    /// Result: either lookup failed in transport, status or decoding
    WeatherDidError { seq: u64, message: String },

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
