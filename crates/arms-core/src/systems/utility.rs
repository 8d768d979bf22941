//! Utility Functions
//!
//! Payoff curves over the number of defecting agents `k`:
//! - cooperate: `base - scalar * ln(1 + k)`, plus any mechanism bonus
//! - defect: `base - scalar * ln(1 + k)`
//!
//! Defection pays more up front but decays faster as more agents arm. The
//! ordering (`defect.base > cooperate.base`, `defect.scalar > cooperate.scalar`)
//! is the caller's to keep; it is checked and reported, never enforced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ArmsError, Result};

/// Default payoff constants
pub mod defaults {
    /// Base utility for cooperating
    pub const COOPERATE_BASE: f64 = 15.0;
    /// Decay scalar for cooperating
    pub const COOPERATE_SCALAR: f64 = 2.0;
    /// Base utility for defecting
    pub const DEFECT_BASE: f64 = 30.0;
    /// Decay scalar for defecting
    pub const DEFECT_SCALAR: f64 = 3.0;
    /// Popularity points split among early cooperators
    pub const POPULARITY_BONUS: f64 = 200.0;
    /// Flat global-support payment for cooperating
    pub const FLAT_SUBSIDY: f64 = 50.0;
}

/// A logarithmically decaying payoff curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    pub base: f64,
    pub scalar: f64,
}

impl PayoffCurve {
    pub const fn new(base: f64, scalar: f64) -> Self {
        Self { base, scalar }
    }

    /// Payoff when `defectors` agents defect.
    pub fn at(&self, defectors: usize) -> f64 {
        self.base - self.scalar * (1.0 + defectors as f64).ln()
    }
}

/// Incentive added to the cooperate payoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mechanism {
    #[default]
    None,
    /// `bonus / (cooperated + 1)`: early cooperators earn the most respect
    PopularityBonus { bonus: f64 },
    /// Fixed payment from a global supporter
    FlatSubsidy { amount: f64 },
}

impl Mechanism {
    pub fn popularity() -> Self {
        Mechanism::PopularityBonus {
            bonus: defaults::POPULARITY_BONUS,
        }
    }

    pub fn subsidy() -> Self {
        Mechanism::FlatSubsidy {
            amount: defaults::FLAT_SUBSIDY,
        }
    }

    /// Bonus paid to a cooperator when `cooperated` agents already cooperated.
    pub fn bonus(&self, cooperated: usize) -> f64 {
        match *self {
            Mechanism::None => 0.0,
            Mechanism::PopularityBonus { bonus } => bonus / (cooperated as f64 + 1.0),
            Mechanism::FlatSubsidy { amount } => amount,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Mechanism::None)
    }

    fn validate(&self) -> Result<()> {
        let value = match *self {
            Mechanism::None => return Ok(()),
            Mechanism::PopularityBonus { bonus } => bonus,
            Mechanism::FlatSubsidy { amount } => amount,
        };
        if !value.is_finite() {
            return Err(ArmsError::invalid(format!(
                "mechanism {} must have a finite amount",
                self
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mechanism::None => write!(f, "none"),
            Mechanism::PopularityBonus { bonus } => write!(f, "popularity_bonus({})", bonus),
            Mechanism::FlatSubsidy { amount } => write!(f, "flat_subsidy({})", amount),
        }
    }
}

/// Both payoff curves plus the active mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityFunctions {
    pub cooperate: PayoffCurve,
    pub defect: PayoffCurve,
    #[serde(default)]
    pub mechanism: Mechanism,
}

impl Default for UtilityFunctions {
    fn default() -> Self {
        Self {
            cooperate: PayoffCurve::new(defaults::COOPERATE_BASE, defaults::COOPERATE_SCALAR),
            defect: PayoffCurve::new(defaults::DEFECT_BASE, defaults::DEFECT_SCALAR),
            mechanism: Mechanism::None,
        }
    }
}

impl UtilityFunctions {
    pub fn new(cooperate: PayoffCurve, defect: PayoffCurve) -> Self {
        Self {
            cooperate,
            defect,
            mechanism: Mechanism::None,
        }
    }

    pub fn with_mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanism = mechanism;
        self
    }

    /// Cooperate payoff including the mechanism bonus.
    pub fn cooperate_utility(&self, defectors: usize, cooperated: usize) -> f64 {
        self.cooperate.at(defectors) + self.mechanism.bonus(cooperated)
    }

    /// Cooperate payoff without any mechanism.
    pub fn base_cooperate_utility(&self, defectors: usize) -> f64 {
        self.cooperate.at(defectors)
    }

    pub fn defect_utility(&self, defectors: usize) -> f64 {
        self.defect.at(defectors)
    }

    /// True when defection pays more up front and decays faster.
    pub fn incentive_ordering_holds(&self) -> bool {
        self.defect.base > self.cooperate.base && self.defect.scalar > self.cooperate.scalar
    }

    pub fn validate(&self) -> Result<()> {
        let constants = [
            self.cooperate.base,
            self.cooperate.scalar,
            self.defect.base,
            self.defect.scalar,
        ];
        if !constants.iter().all(|c| c.is_finite()) {
            return Err(ArmsError::invalid(format!(
                "payoff constants must be finite, got cooperate {:?} defect {:?}",
                self.cooperate, self.defect
            )));
        }
        self.mechanism.validate()
    }
}
