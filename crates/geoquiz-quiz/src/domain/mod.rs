//! Domain model for quiz sessions.

pub mod commands;
pub mod generator;
pub mod hints;
pub mod question;
pub mod repository;
pub mod scoring;
pub mod session;
