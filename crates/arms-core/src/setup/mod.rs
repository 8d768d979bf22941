//! Scenario Setup
//!
//! Phase definitions and the tables sampled for them.

pub mod phases;

pub use phases::{default_phases, PhaseSpec};
