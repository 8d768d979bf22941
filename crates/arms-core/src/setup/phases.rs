//! Scenario Phases
//!
//! A run is a sequence of phases. Each phase redraws both tables from its own
//! bounds and may switch on a mechanism, modelling a policy change between
//! phases (better reputations, warmer relations, outside support).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{ScenarioSnapshot, SampleBounds, RELATIONSHIP_DOMAIN, REPUTATION_DOMAIN};
use crate::error::{ArmsError, Result};
use crate::systems::utility::Mechanism;

/// Bounds used when a phase leaves relationships "as usual"
pub const MIXED_RELATIONS: SampleBounds = SampleBounds::new(-0.5, 0.2);
/// Bounds for agents nobody expects to cooperate
pub const POOR_REPUTATIONS: SampleBounds = SampleBounds::new(0.0, 0.3);
/// Bounds for agents everybody expects to cooperate
pub const TRUSTED_REPUTATIONS: SampleBounds = SampleBounds::new(0.7, 1.0);
/// Bounds for uniformly friendly relations
pub const IMPROVED_RELATIONS: SampleBounds = SampleBounds::new(0.0, 1.0);

/// One phase of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub relationships: SampleBounds,
    pub reputations: SampleBounds,
    #[serde(default)]
    pub mechanism: Mechanism,
    /// Overrides the run-wide round count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
}

impl PhaseSpec {
    pub fn new(name: impl Into<String>, relationships: SampleBounds, reputations: SampleBounds) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            relationships,
            reputations,
            mechanism: Mechanism::None,
            rounds: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanism = mechanism;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    /// Rounds to run, falling back to the run-wide default.
    pub fn rounds_or(&self, default_rounds: u32) -> u32 {
        self.rounds.unwrap_or(default_rounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ArmsError::invalid("phase name must not be empty"));
        }
        let label = |table: &str| format!("phase '{}' {}", self.name, table);
        self.relationships
            .validate(&label("relationship"), RELATIONSHIP_DOMAIN)?;
        self.reputations
            .validate(&label("reputation"), REPUTATION_DOMAIN)?;
        if self.rounds == Some(0) {
            return Err(ArmsError::invalid(format!(
                "phase '{}' must run at least 1 round",
                self.name
            )));
        }
        Ok(())
    }

    /// Draws this phase's tables.
    pub fn sample_snapshot<R: Rng>(&self, agent_count: usize, rng: &mut R) -> Result<ScenarioSnapshot> {
        ScenarioSnapshot::sample(agent_count, self.relationships, self.reputations, rng)
    }
}

/// The four-part arms-race narrative.
pub fn default_phases() -> Vec<PhaseSpec> {
    vec![
        PhaseSpec::new("baseline", MIXED_RELATIONS, POOR_REPUTATIONS)
            .with_description("Poor reputations and mixed relationships: every nation expects the others to arm"),
        PhaseSpec::new("trusted_reputations", MIXED_RELATIONS, TRUSTED_REPUTATIONS)
            .with_description("Reputations raised through treaties, diplomacy and arsenal transparency"),
        PhaseSpec::new("improved_relations", IMPROVED_RELATIONS, POOR_REPUTATIONS)
            .with_description("Reputations back to poor, relationships improved through trade and alliances"),
        PhaseSpec::new("global_support", MIXED_RELATIONS, POOR_REPUTATIONS)
            .with_description("Baseline tables with an outside supporter paying nations that cooperate")
            .with_mechanism(Mechanism::subsidy()),
    ]
}
