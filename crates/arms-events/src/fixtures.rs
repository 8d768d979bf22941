//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to use these helpers from other crates.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // arms-events = { path = "../arms-events", features = ["test-fixtures"] }
//!
//! use arms_events::fixtures;
//!
//! let report = fixtures::sample_report();
//! ```

use crate::RunReport;

/// Returns a sample three-agent run from the fixtures file.
///
/// Contains two single-round phases:
/// - `baseline`: every agent defects
/// - `global_support`: every agent cooperates under a flat subsidy
pub fn sample_report() -> RunReport {
    let json = include_str!("../tests/fixtures/sample_report.json");
    RunReport::from_json(json)
        .unwrap_or_else(|e| panic!("Failed to parse sample report fixture: {}", e))
}
