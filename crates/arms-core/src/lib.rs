//! Arms-race expected-utility engine.
//!
//! Nations decide whether to build arms by comparing the expected utility of
//! cooperating against defecting, given how likely every other nation is to
//! reciprocate. Reputation and pairwise relationships drive those
//! likelihoods through a logistic response model.

pub mod baseline;
pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{RelationshipMatrix, ReputationVector, SampleBounds, ScenarioSnapshot};
pub use config::ArmsConfig;
pub use error::{ArmsError, Result};
pub use simulation::Simulation;
pub use systems::{
    DecisionLoop, ExpectedUtilityEngine, Mechanism, ResponseModel, ResponseWeights,
    UtilityFunctions,
};
