//! Decision Systems
//!
//! The response model, subset enumeration, payoff curves, expected-utility
//! engine and the decision loop built on them.

pub mod decision;
pub mod expected;
pub mod probability;
pub mod subsets;
pub mod utility;

// Re-export commonly used items
pub use decision::{choose, DecisionLoop};
pub use expected::{
    round_to, ActionEvaluation, ExpectedUtilityEngine, AGENT_CEILING, DEFAULT_MAX_AGENTS,
    DISPLAY_DECIMALS,
};
pub use probability::{logistic, PeerResponse, ResponseModel, ResponseWeights};
pub use subsets::{joint_outcomes, JointOutcome, OutcomeKind, Subset, SubsetEnumerator, MAX_PEERS};
pub use utility::{Mechanism, PayoffCurve, UtilityFunctions};
