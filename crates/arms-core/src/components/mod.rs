//! Scenario Components
//!
//! The read-only tables an agent consults when deciding: pairwise relationships,
//! per-agent reputations, and the snapshot that bundles them for one phase.

pub mod bounds;
pub mod relationships;
pub mod reputation;
pub mod scenario;

pub use bounds::{SampleBounds, RELATIONSHIP_DOMAIN, REPUTATION_DOMAIN};
pub use relationships::RelationshipMatrix;
pub use reputation::ReputationVector;
pub use scenario::ScenarioSnapshot;
