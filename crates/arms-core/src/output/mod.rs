//! Output
//!
//! Console narration and JSON export of finished runs.

pub mod console;
pub mod export;

pub use console::{render_baseline, render_decision, render_phase, render_report};
pub use export::{write_json, OutputError};
