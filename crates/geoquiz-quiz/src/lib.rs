//! GeoQuiz — quiz sessions.
//!
//! Responsible for generating question sets, running the per-session state
//! machine (answers, hints, completion), and aggregating final results.

pub mod application;
pub mod domain;
pub mod store;
