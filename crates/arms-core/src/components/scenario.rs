//! Scenario Snapshot
//!
//! The immutable pair of tables that every decision in one phase reads from.
//! Tables are replaced wholesale between phases, never edited during one.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::{RelationshipMatrix, ReputationVector, SampleBounds};
use crate::error::{ArmsError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSnapshot {
    relationships: RelationshipMatrix,
    reputations: ReputationVector,
}

impl ScenarioSnapshot {
    /// Pairs the two tables; both must cover the same agents.
    pub fn new(relationships: RelationshipMatrix, reputations: ReputationVector) -> Result<Self> {
        if relationships.len() != reputations.len() {
            return Err(ArmsError::invalid(format!(
                "relationship table covers {} agents but reputation table covers {}",
                relationships.len(),
                reputations.len()
            )));
        }
        Ok(Self {
            relationships,
            reputations,
        })
    }

    /// Samples fresh tables for `agent_count` agents.
    ///
    /// Relationships are drawn before reputations so a seed fixes both.
    pub fn sample<R: Rng>(
        agent_count: usize,
        relationship_bounds: SampleBounds,
        reputation_bounds: SampleBounds,
        rng: &mut R,
    ) -> Result<Self> {
        let relationships = RelationshipMatrix::sample(agent_count, relationship_bounds, rng)?;
        let reputations = ReputationVector::sample(agent_count, reputation_bounds, rng)?;
        Self::new(relationships, reputations)
    }

    pub fn agent_count(&self) -> usize {
        self.reputations.len()
    }

    pub fn relationships(&self) -> &RelationshipMatrix {
        &self.relationships
    }

    pub fn reputations(&self) -> &ReputationVector {
        &self.reputations
    }

    pub fn relationship(&self, a: usize, b: usize) -> f64 {
        self.relationships.get(a, b)
    }

    pub fn reputation(&self, agent: usize) -> f64 {
        self.reputations.get(agent)
    }

    /// Every agent except `agent`, in index order.
    pub fn peers(&self, agent: usize) -> impl Iterator<Item = usize> {
        (0..self.agent_count()).filter(move |&other| other != agent)
    }
}

impl<'de> Deserialize<'de> for ScenarioSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tables {
            relationships: RelationshipMatrix,
            reputations: ReputationVector,
        }

        let tables = Tables::deserialize(deserializer)?;
        Self::new(tables.relationships, tables.reputations).map_err(serde::de::Error::custom)
    }
}
