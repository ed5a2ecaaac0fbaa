//! Core library for the lanyard event-attendance client.
//!
//! Holds everything below the presentation layer: configuration, the
//! persistent credential store, the session state machine, the typed API
//! gateway, the route guard, form validation, and the map-link capability.
//! The CLI crate consumes these through explicitly constructed values; there
//! are no module-level globals.

pub mod api;
pub mod config;
pub mod guard;
pub mod maps;
pub mod session;
pub mod validate;
