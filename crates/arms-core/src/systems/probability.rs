//! Response Probability Model
//!
//! Logistic estimate of whether a peer cooperates, given the acting agent's
//! choice:
//!
//! ```text
//! x = w_rep * reputation[other] + w_rel * relationship[acting][other]
//!     - w_choice * choice - bias
//! p = 1 / (1 + e^-x)
//! ```

use serde::{Deserialize, Serialize};

use arms_events::ActionChoice;

use crate::components::ScenarioSnapshot;
use crate::error::{ArmsError, Result};

/// Weight constants for the logistic response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseWeights {
    /// Weight on the peer's reputation
    pub reputation: f64,
    /// Weight on the relationship between the two agents
    pub relationship: f64,
    /// Penalty applied when the acting agent defects
    pub choice: f64,
    /// Shifts the curve's midpoint; positive values make cooperation less likely
    pub bias: f64,
}

impl Default for ResponseWeights {
    fn default() -> Self {
        Self {
            reputation: 5.0,
            relationship: 3.0,
            choice: 1.0,
            bias: 0.0,
        }
    }
}

impl ResponseWeights {
    pub fn validate(&self) -> Result<()> {
        let all_finite = [self.reputation, self.relationship, self.choice, self.bias]
            .iter()
            .all(|w| w.is_finite());
        if !all_finite {
            return Err(ArmsError::invalid(format!(
                "response weights must be finite, got {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// Standard logistic function.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A peer's estimated probability of cooperating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerResponse {
    pub peer: usize,
    pub cooperate: f64,
}

impl PeerResponse {
    pub fn defect(&self) -> f64 {
        1.0 - self.cooperate
    }
}

/// Stateless logistic response model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResponseModel {
    weights: ResponseWeights,
}

impl ResponseModel {
    pub fn new(weights: ResponseWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ResponseWeights {
        &self.weights
    }

    /// The logistic input `x` for one ordered pair.
    pub fn logit(
        &self,
        snapshot: &ScenarioSnapshot,
        acting: usize,
        other: usize,
        choice: ActionChoice,
    ) -> f64 {
        let w = &self.weights;
        w.reputation * snapshot.reputation(other) + w.relationship * snapshot.relationship(acting, other)
            - w.choice * choice.encoding()
            - w.bias
    }

    /// Probability that `other` cooperates after `acting` plays `choice`.
    ///
    /// Strictly inside (0, 1); a saturated or NaN value is an error.
    pub fn probability(
        &self,
        snapshot: &ScenarioSnapshot,
        acting: usize,
        other: usize,
        choice: ActionChoice,
    ) -> Result<f64> {
        let n = snapshot.agent_count();
        if acting >= n || other >= n {
            return Err(ArmsError::invalid(format!(
                "agent pair ({}, {}) outside a scenario of {} agents",
                acting, other, n
            )));
        }
        if acting == other {
            return Err(ArmsError::invalid(format!(
                "agent {} has no response probability toward itself",
                acting
            )));
        }

        let p = logistic(self.logit(snapshot, acting, other, choice));
        if p > 0.0 && p < 1.0 {
            Ok(p)
        } else {
            Err(ArmsError::NumericDomain {
                acting,
                other,
                value: p,
            })
        }
    }

    /// Cooperation probabilities of every peer of `agent`, in peer index order.
    pub fn peer_responses(
        &self,
        snapshot: &ScenarioSnapshot,
        agent: usize,
        choice: ActionChoice,
    ) -> Result<Vec<PeerResponse>> {
        snapshot
            .peers(agent)
            .map(|peer| {
                self.probability(snapshot, agent, peer, choice)
                    .map(|cooperate| PeerResponse { peer, cooperate })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{RelationshipMatrix, ReputationVector, SampleBounds};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn neutral_snapshot(n: usize, reputation: f64) -> ScenarioSnapshot {
        ScenarioSnapshot::new(
            RelationshipMatrix::new(n),
            ReputationVector::uniform(n, reputation).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_known_values() {
        let model = ResponseModel::default();
        let snapshot = neutral_snapshot(3, 0.1);

        // logistic(0.5)
        let cooperate = model
            .probability(&snapshot, 0, 1, ActionChoice::Cooperate)
            .unwrap();
        assert!((cooperate - 0.6225).abs() < 1e-4);

        // logistic(-0.5)
        let defect = model.probability(&snapshot, 0, 1, ActionChoice::Defect).unwrap();
        assert!((defect - 0.3775).abs() < 1e-4);
    }

    #[test]
    fn test_defecting_lowers_peer_cooperation() {
        let model = ResponseModel::default();
        let snapshot = neutral_snapshot(4, 0.6);
        for peer in 1..4 {
            let c = model.probability(&snapshot, 0, peer, ActionChoice::Cooperate).unwrap();
            let d = model.probability(&snapshot, 0, peer, ActionChoice::Defect).unwrap();
            assert!(d < c);
        }
    }

    #[test]
    fn test_bias_shifts_midpoint() {
        let weights = ResponseWeights {
            bias: 0.5,
            ..ResponseWeights::default()
        };
        let model = ResponseModel::new(weights).unwrap();
        let snapshot = neutral_snapshot(2, 0.1);
        let p = model.probability(&snapshot, 0, 1, ActionChoice::Cooperate).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_strictly_inside_unit_interval() {
        let model = ResponseModel::default();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            let snapshot = ScenarioSnapshot::sample(
                6,
                SampleBounds::new(-1.0, 1.0),
                SampleBounds::new(0.0, 1.0),
                &mut rng,
            )
            .unwrap();
            for a in 0..6 {
                for choice in ActionChoice::ALL {
                    for r in model.peer_responses(&snapshot, a, choice).unwrap() {
                        assert!(r.cooperate > 0.0 && r.cooperate < 1.0);
                        assert!(r.defect() > 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_self_probability_rejected() {
        let model = ResponseModel::default();
        let snapshot = neutral_snapshot(3, 0.5);
        let err = model
            .probability(&snapshot, 1, 1, ActionChoice::Cooperate)
            .unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_saturation_is_numeric_domain_error() {
        let weights = ResponseWeights {
            reputation: 1.0e6,
            ..ResponseWeights::default()
        };
        let model = ResponseModel::new(weights).unwrap();
        let snapshot = neutral_snapshot(2, 1.0);
        let err = model
            .probability(&snapshot, 0, 1, ActionChoice::Cooperate)
            .unwrap_err();
        assert!(matches!(err, ArmsError::NumericDomain { acting: 0, other: 1, .. }));
    }

    #[test]
    fn test_non_finite_weights_rejected() {
        let weights = ResponseWeights {
            choice: f64::NAN,
            ..ResponseWeights::default()
        };
        assert!(ResponseModel::new(weights).is_err());
    }

    #[test]
    fn test_peer_responses_order() {
        let model = ResponseModel::default();
        let snapshot = neutral_snapshot(4, 0.2);
        let peers: Vec<usize> = model
            .peer_responses(&snapshot, 2, ActionChoice::Cooperate)
            .unwrap()
            .iter()
            .map(|r| r.peer)
            .collect();
        assert_eq!(peers, vec![0, 1, 3]);
    }
}
