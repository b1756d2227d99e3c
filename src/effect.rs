//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up coordinates for the (already trimmed) query
    ResolveCity { seq: u64, query: String },
    /// Fetch the current temperature at the given coordinates
    FetchWeather {
        seq: u64,
        city: String,
        latitude: f64,
        longitude: f64,
    },
}
