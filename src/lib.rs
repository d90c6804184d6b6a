//! Scattered Lights - wellness journal for the terminal
//!
//! Keeps markdown journal entries with streak tracking, a seven-chakra
//! self-assessment with guidance, and emotion logging with trend
//! aggregation.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::LightsError;
