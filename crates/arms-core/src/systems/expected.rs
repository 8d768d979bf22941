//! Expected Utility Engine
//!
//! Computes an agent's expected payoff for one action by walking every joint
//! response of its peers. For action choice `c` and peer probabilities
//! `p_j = P(j cooperates | c)`:
//!
//! ```text
//! EU = Π(1 - p_j) · defect(n - 1)
//!    + Π p_j      · cooperate(0)
//!    + Σ_S [ Π_{j∉S} p_j · cooperate(n - |S|) + Π_{j∈S} (1 - p_j) · defect(|S|) ]
//! ```
//!
//! where `S` ranges over the non-empty subsets of peers assumed to defect.
//! The sum is a single fold over the lazy subset sequence.

use tracing::debug;

use arms_events::{ActionChoice, ResponseOutlook};

use crate::components::ScenarioSnapshot;
use crate::error::{ArmsError, Result};
use crate::systems::probability::{PeerResponse, ResponseModel};
use crate::systems::subsets::SubsetEnumerator;
use crate::systems::utility::UtilityFunctions;

/// Default combinatorial safety bound on the agent count.
pub const DEFAULT_MAX_AGENTS: usize = 16;

/// Largest bound a configuration may raise `max_agents` to.
pub const AGENT_CEILING: usize = 20;

/// Decimal places kept in reported expected utilities.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Rounds `value` to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Expected utility of one action, with the peer outlook behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEvaluation {
    pub action: ActionChoice,
    /// Rounded to [`DISPLAY_DECIMALS`]
    pub expected_utility: f64,
    pub unrounded: f64,
    pub outlook: ResponseOutlook,
}

/// Combines the response model and utility functions into expected payoffs.
#[derive(Debug, Clone)]
pub struct ExpectedUtilityEngine {
    model: ResponseModel,
    utility: UtilityFunctions,
    max_agents: usize,
}

impl Default for ExpectedUtilityEngine {
    fn default() -> Self {
        Self {
            model: ResponseModel::default(),
            utility: UtilityFunctions::default(),
            max_agents: DEFAULT_MAX_AGENTS,
        }
    }
}

impl ExpectedUtilityEngine {
    pub fn new(model: ResponseModel, utility: UtilityFunctions, max_agents: usize) -> Result<Self> {
        if !(2..=AGENT_CEILING).contains(&max_agents) {
            return Err(ArmsError::invalid(format!(
                "max_agents must be between 2 and {}, got {}",
                AGENT_CEILING, max_agents
            )));
        }
        utility.validate()?;
        Ok(Self {
            model,
            utility,
            max_agents,
        })
    }

    pub fn model(&self) -> &ResponseModel {
        &self.model
    }

    pub fn utility(&self) -> &UtilityFunctions {
        &self.utility
    }

    pub fn max_agents(&self) -> usize {
        self.max_agents
    }

    /// Same engine with a different utility strategy.
    pub fn with_utility(&self, utility: UtilityFunctions) -> Result<Self> {
        Self::new(self.model, utility, self.max_agents)
    }

    /// Rejects populations the engine cannot or should not enumerate.
    pub fn check_population(&self, agent_count: usize) -> Result<()> {
        if agent_count < 2 {
            return Err(ArmsError::invalid(format!(
                "at least 2 agents are required, got {}",
                agent_count
            )));
        }
        if agent_count > self.max_agents {
            return Err(ArmsError::invalid(format!(
                "{} agents exceeds the enumeration bound of {} (2^{} peer outcomes)",
                agent_count,
                self.max_agents,
                agent_count - 1
            )));
        }
        Ok(())
    }

    /// Evaluates `action` for `agent`.
    ///
    /// `cooperated` is the number of agents that have already cooperated,
    /// read only by the popularity mechanism.
    pub fn evaluate(
        &self,
        snapshot: &ScenarioSnapshot,
        agent: usize,
        action: ActionChoice,
        cooperated: usize,
    ) -> Result<ActionEvaluation> {
        let n = snapshot.agent_count();
        self.check_population(n)?;
        if agent >= n {
            return Err(ArmsError::invalid(format!(
                "agent {} outside a scenario of {} agents",
                agent, n
            )));
        }

        let responses = self.model.peer_responses(snapshot, agent, action)?;
        let subsets = SubsetEnumerator::new(&responses)?;

        // The mechanism only rewards the acting agent for cooperating.
        let utility = &self.utility;
        let cooperate_utility = |defectors: usize| match action {
            ActionChoice::Cooperate => utility.cooperate_utility(defectors, cooperated),
            ActionChoice::Defect => utility.base_cooperate_utility(defectors),
        };

        let all_cooperate: f64 = responses.iter().map(|r| r.cooperate).product();
        let all_defect: f64 = responses.iter().map(PeerResponse::defect).product();

        let mixed = subsets.iter().fold(0.0, |total, subset| {
            let defect_probability: f64 = subset.members().map(PeerResponse::defect).product();
            let cooperate_probability: f64 = subset.complement().map(|r| r.cooperate).product();
            total
                + cooperate_probability * cooperate_utility(n - subset.len())
                + defect_probability * utility.defect_utility(subset.len())
        });

        let unrounded = all_defect * utility.defect_utility(n - 1)
            + all_cooperate * cooperate_utility(0)
            + mixed;

        let outlook = ResponseOutlook {
            all_cooperate,
            all_defect,
            expected_cooperators: responses.iter().map(|r| r.cooperate).sum(),
        };

        debug!(
            "agent {} {}: expected utility {:.4} over {} subsets (all cooperate {:.4}, all defect {:.4})",
            agent,
            action,
            unrounded,
            subsets.subset_count(),
            all_cooperate,
            all_defect
        );

        Ok(ActionEvaluation {
            action,
            expected_utility: round_to(unrounded, DISPLAY_DECIMALS),
            unrounded,
            outlook,
        })
    }

    /// Rounded expected utility of `action` for `agent`.
    pub fn expected_utility(
        &self,
        snapshot: &ScenarioSnapshot,
        agent: usize,
        action: ActionChoice,
        cooperated: usize,
    ) -> Result<f64> {
        Ok(self.evaluate(snapshot, agent, action, cooperated)?.expected_utility)
    }
}
