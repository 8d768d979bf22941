//! Configuration System
//!
//! Loads run parameters from a TOML file. Every section is optional; missing
//! values fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::baseline::LinearPayoffs;
use crate::error::{ArmsError, Result};
use crate::setup::{default_phases, PhaseSpec};
use crate::systems::expected::{AGENT_CEILING, DEFAULT_MAX_AGENTS};
use crate::systems::probability::ResponseWeights;
use crate::systems::utility::{defaults, Mechanism, PayoffCurve, UtilityFunctions};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "arms_race.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmsConfig {
    pub simulation: SimulationConfig,
    pub response: ResponseWeights,
    pub payoffs: PayoffConfig,
    pub baseline: LinearPayoffs,
    pub phases: Vec<PhaseSpec>,
}

impl Default for ArmsConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            response: ResponseWeights::default(),
            payoffs: PayoffConfig::default(),
            baseline: LinearPayoffs::default(),
            phases: default_phases(),
        }
    }
}

/// Run-wide parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of nations
    pub agent_count: usize,
    /// Decision rounds per phase
    pub rounds: u32,
    /// Seed for table sampling and the random baseline
    pub seed: u64,
    /// Enumeration safety bound on `agent_count`
    pub max_agents: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            rounds: 1,
            seed: 42,
            max_agents: DEFAULT_MAX_AGENTS,
        }
    }
}

/// Payoff curve constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    pub cooperate: PayoffCurve,
    pub defect: PayoffCurve,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            cooperate: PayoffCurve::new(defaults::COOPERATE_BASE, defaults::COOPERATE_SCALAR),
            defect: PayoffCurve::new(defaults::DEFECT_BASE, defaults::DEFECT_SCALAR),
        }
    }
}

impl PayoffConfig {
    /// Utility functions for a phase running `mechanism`.
    pub fn utility_functions(&self, mechanism: Mechanism) -> UtilityFunctions {
        UtilityFunctions::new(self.cooperate, self.defect).with_mechanism(mechanism)
    }
}

impl ArmsConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads from `path` if it exists, otherwise uses defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::from_file(path).unwrap_or_else(|e| {
            warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks everything that can be checked before sampling or enumerating.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if !(2..=AGENT_CEILING).contains(&sim.max_agents) {
            return Err(ArmsError::invalid(format!(
                "max_agents must be between 2 and {}, got {}",
                AGENT_CEILING, sim.max_agents
            )));
        }
        if sim.agent_count < 2 {
            return Err(ArmsError::invalid(format!(
                "at least 2 agents are required, got {}",
                sim.agent_count
            )));
        }
        if sim.agent_count > sim.max_agents {
            return Err(ArmsError::invalid(format!(
                "{} agents exceeds the enumeration bound of {}",
                sim.agent_count, sim.max_agents
            )));
        }
        if sim.rounds == 0 {
            return Err(ArmsError::invalid("round count must be at least 1"));
        }
        if self.phases.is_empty() {
            return Err(ArmsError::invalid("at least one phase is required"));
        }

        self.response.validate()?;
        for phase in &self.phases {
            phase.validate()?;
            self.payoffs.utility_functions(phase.mechanism).validate()?;
        }

        let utility = self.payoffs.utility_functions(Mechanism::None);
        if !utility.incentive_ordering_holds() {
            warn!(
                "payoffs do not model an arms race: expected defect base {} > cooperate base {} and defect scalar {} > cooperate scalar {}",
                utility.defect.base, utility.cooperate.base, utility.defect.scalar, utility.cooperate.scalar
            );
        }
        Ok(())
    }
}

/// Returns the default configuration as a TOML string.
pub fn default_config_toml() -> std::result::Result<String, ConfigError> {
    ArmsConfig::default().to_toml()
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error serializing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ArmsConfig::default();
        assert_eq!(config.simulation.agent_count, 5);
        assert_eq!(config.simulation.rounds, 1);
        assert_eq!(config.response.reputation, 5.0);
        assert_eq!(config.phases.len(), 4);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ArmsConfig::from_str(
            r#"
[simulation]
agent_count = 3

[response]
bias = 1.1
"#,
        )
        .unwrap();
        assert_eq!(config.simulation.agent_count, 3);
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.response.bias, 1.1);
        assert_eq!(config.response.relationship, 3.0);
        assert_eq!(config.phases, default_phases());
    }

    #[test]
    fn test_custom_phases() {
        let config = ArmsConfig::from_str(
            r#"
[[phases]]
name = "popular"
relationships = { lower = 0.0, upper = 0.5 }
reputations = { lower = 0.2, upper = 0.4 }
mechanism = { kind = "popularity_bonus", bonus = 120.0 }
rounds = 3
"#,
        )
        .unwrap();
        assert_eq!(config.phases.len(), 1);
        let phase = &config.phases[0];
        assert_eq!(phase.mechanism, Mechanism::PopularityBonus { bonus: 120.0 });
        assert_eq!(phase.rounds, Some(3));
        config.validate().unwrap();
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ArmsConfig::default();
        let toml = config.to_toml().unwrap();
        let parsed = ArmsConfig::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nagent_count = 4\nrounds = 2").unwrap();

        let config = ArmsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.simulation.agent_count, 4);
        assert_eq!(config.simulation.rounds, 2);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArmsConfig::load_or_default(dir.path().join("absent.toml"));
        assert_eq!(config, ArmsConfig::default());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ArmsConfig::from_str("[simulation]\nagent_count = \"five\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ArmsConfig::default();
        config.simulation.agent_count = 1;
        assert!(config.validate().unwrap_err().is_invalid_configuration());

        let mut config = ArmsConfig::default();
        config.simulation.agent_count = 40;
        assert!(config.validate().is_err());

        let mut config = ArmsConfig::default();
        config.simulation.max_agents = 21;
        assert!(config.validate().unwrap_err().is_invalid_configuration());

        let mut config = ArmsConfig::default();
        config.simulation.rounds = 0;
        assert!(config.validate().is_err());

        let mut config = ArmsConfig::default();
        config.phases.clear();
        assert!(config.validate().is_err());

        let mut config = ArmsConfig::default();
        config.phases[0].reputations.lower = 0.9;
        config.phases[0].reputations.upper = 0.1;
        assert!(config.validate().is_err());
    }
}
