//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, CityWeather, CITY_NOT_FOUND, FETCH_FAILED};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query actions =====
        Action::QueryChange(query) => {
            if state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::QuerySubmit(query) => {
            let trimmed = query.trim();
            if trimmed.is_empty() {
                return DispatchResult::unchanged();
            }
            let trimmed = trimmed.to_string();

            state.query = query;
            state.request_seq += 1;
            state.weather = DataResource::Loading;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::ResolveCity {
                seq: state.request_seq,
                query: trimmed,
            })
        }

        // ===== Geocode actions =====
        Action::GeocodeDidResolve { seq, location } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            state.city_name = location.name;
            DispatchResult::changed_with(Effect::FetchWeather {
                seq,
                city: state.city_name.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
            })
        }

        Action::GeocodeDidNotFind { seq } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(CITY_NOT_FOUND.to_string());
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad { seq, reading } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            let result = CityWeather {
                city_name: state.city_name.clone(),
                reading,
            };
            state.last_result = Some(result.clone());
            state.weather = DataResource::Loaded(result);
            DispatchResult::changed()
        }

        // Detail is logged by the task; the panel only shows the generic message.
        Action::WeatherDidError { seq, .. } => {
            if !state.is_current(seq) {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(FETCH_FAILED.to_string());
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.loading_anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ResolvedLocation, WeatherReading};

    fn paris() -> ResolvedLocation {
        ResolvedLocation {
            name: "Paris".into(),
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut state = AppState::default();
        let before = state.clone();

        for query in ["", "   ", "\t\n"] {
            let result = reducer(&mut state, Action::QuerySubmit(query.into()));
            assert!(!result.changed);
            assert!(result.effects.is_empty());
        }

        assert_eq!(state.query, before.query);
        assert_eq!(state.request_seq, 0);
        assert!(state.weather.is_empty());
    }

    #[test]
    fn test_submit_sets_loading_and_trims() {
        let mut state = AppState {
            tick_count: 9,
            weather: DataResource::Failed(CITY_NOT_FOUND.into()),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::QuerySubmit("  Paris ".into()));

        assert!(result.changed);
        assert!(state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.request_seq, 1);
        assert_eq!(
            result.effects,
            vec![Effect::ResolveCity {
                seq: 1,
                query: "Paris".into()
            }]
        );
    }

    #[test]
    fn test_resolve_updates_heading_and_chains_fetch() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuerySubmit("Paris".into()));

        let result = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                seq: 1,
                location: paris(),
            },
        );

        assert!(result.changed);
        assert!(state.is_loading());
        assert_eq!(state.city_name, "Paris");
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                seq: 1,
                city: "Paris".into(),
                latitude: 48.85,
                longitude: 2.35
            }]
        );
    }

    #[test]
    fn test_not_found_keeps_last_result() {
        let previous = CityWeather {
            city_name: "Oslo".into(),
            reading: WeatherReading {
                temperature_celsius: 4.0,
            },
        };
        let mut state = AppState {
            last_result: Some(previous.clone()),
            ..Default::default()
        };
        reducer(&mut state, Action::QuerySubmit("Atlantis".into()));

        reducer(&mut state, Action::GeocodeDidNotFind { seq: 1 });

        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(CITY_NOT_FOUND));
        assert_eq!(state.last_result, Some(previous));
    }

    #[test]
    fn test_weather_error_keeps_heading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuerySubmit("Paris".into()));
        reducer(
            &mut state,
            Action::GeocodeDidResolve {
                seq: 1,
                location: paris(),
            },
        );

        reducer(
            &mut state,
            Action::WeatherDidError {
                seq: 1,
                message: "connection refused".into(),
            },
        );

        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(FETCH_FAILED));
        assert_eq!(state.city_name, "Paris");
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuerySubmit("Paris".into()));
        reducer(&mut state, Action::QuerySubmit("Berlin".into()));
        assert_eq!(state.request_seq, 2);

        let result = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                seq: 1,
                location: paris(),
            },
        );
        assert!(!result.changed);
        assert!(result.effects.is_empty());

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                reading: WeatherReading {
                    temperature_celsius: 18.5,
                },
            },
        );
        assert!(!result.changed);
        assert!(state.is_loading());
        assert_eq!(state.city_name, AppState::default().city_name);
    }

    #[test]
    fn test_tick_only_rerenders_while_loading() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);
        assert_eq!(state.tick_count, 0);

        state.weather = DataResource::Loading;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn test_query_change_has_no_effect() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::QueryChange("Lis".into()));
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.query, "Lis");

        let result = reducer(&mut state, Action::QueryChange("Lis".into()));
        assert!(!result.changed);
    }
}
