//! GeoQuiz API server library.
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! build the same router against deterministic state.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
