//! GeoQuiz Core — shared domain abstractions.
//!
//! This crate defines the traits and types every other crate depends on:
//! time and randomness seams, the command contract, and the domain error
//! taxonomy. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod rng;
