//! Reputation Vector
//!
//! One scalar per agent: how likely everyone else thinks that agent is to
//! cooperate. 0 means expected to defect, 1 expected to cooperate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{SampleBounds, REPUTATION_DOMAIN};
use crate::error::{ArmsError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ReputationVector(Vec<f64>);

impl ReputationVector {
    /// Wraps explicit values; each must be finite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((agent, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ArmsError::invalid(format!(
                "reputation of agent {} must be finite, got {}",
                agent, value
            )));
        }
        Ok(Self(values))
    }

    /// Every agent gets the same reputation.
    pub fn uniform(size: usize, value: f64) -> Result<Self> {
        Self::new(vec![value; size])
    }

    /// Draws each agent's reputation from `bounds`.
    pub fn sample<R: Rng>(size: usize, bounds: SampleBounds, rng: &mut R) -> Result<Self> {
        bounds.validate("reputation", REPUTATION_DOMAIN)?;
        Ok(Self((0..size).map(|_| bounds.sample(rng)).collect()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reputation of `agent`.
    ///
    /// # Panics
    ///
    /// Panics if `agent` is out of range.
    pub fn get(&self, agent: usize) -> f64 {
        self.0[agent]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Mean reputation across agents (0.0 when empty).
    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }
}

impl TryFrom<Vec<f64>> for ReputationVector {
    type Error = ArmsError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<ReputationVector> for Vec<f64> {
    fn from(reputations: ReputationVector) -> Self {
        reputations.0
    }
}
