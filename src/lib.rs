//! Weather Workshop - type a city, get its current temperature
//!
//! The library holds the store pieces (state, actions, reducer, effects), the
//! Open-Meteo client and the task bodies that execute effects, so that all of
//! them can be tested without a terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod tasks;
