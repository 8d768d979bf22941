//! Report Types
//!
//! Serialization structs for a finished run: one report per scenario phase,
//! each holding its round summaries.

use serde::{Deserialize, Serialize};

use crate::RoundSummary;

/// Generates a run ID from the RNG seed it was produced with.
pub fn generate_run_id(seed: u64) -> String {
    format!("run_{:016x}", seed)
}

/// Generates a phase ID with the given sequence number.
pub fn generate_phase_id(sequence: usize) -> String {
    format!("phase_{:02}", sequence)
}

/// Results of one scenario phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Human-readable mechanism label ("none", "flat_subsidy(50)", ...)
    pub mechanism: String,
    pub agent_count: usize,
    pub rounds: Vec<RoundSummary>,
}

impl PhaseReport {
    /// Cooperators per round, in round order.
    pub fn cooperators_per_round(&self) -> Vec<usize> {
        self.rounds.iter().map(|r| r.cooperator_count).collect()
    }

    /// Cooperator count of the last round, if any round ran.
    pub fn final_cooperators(&self) -> Option<usize> {
        self.rounds.last().map(|r| r.cooperator_count)
    }
}

/// Complete output of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub agent_count: usize,
    pub phases: Vec<PhaseReport>,
}

impl RunReport {
    pub fn new(seed: u64, agent_count: usize) -> Self {
        Self {
            run_id: generate_run_id(seed),
            seed,
            agent_count,
            phases: Vec::new(),
        }
    }

    /// Looks up a phase by name.
    pub fn phase(&self, name: &str) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
