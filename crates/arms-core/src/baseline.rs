//! Greedy vs Random Baseline
//!
//! The plain linear dilemma used to motivate the expected-utility engine.
//! Players move one after another; `n_b` counts players who defected before:
//! - defect pays `A - X * n_b`
//! - cooperate pays `B - Y * n_b`
//!
//! Greedy players always take the larger payoff, which with the default
//! constants means everyone defects. Random players flip a coin.

use rand::Rng;
use serde::{Deserialize, Serialize};

use arms_events::ActionChoice;

use crate::error::{ArmsError, Result};

/// Linear payoff constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearPayoffs {
    /// Base utility for building arms (A)
    pub defect_base: f64,
    /// Base utility for not building arms (B)
    pub cooperate_base: f64,
    /// Cost per earlier defector when building arms (X)
    pub defect_cost: f64,
    /// Cost per earlier defector when not building arms (Y)
    pub cooperate_cost: f64,
}

impl Default for LinearPayoffs {
    fn default() -> Self {
        Self {
            defect_base: 10.0,
            cooperate_base: 8.0,
            defect_cost: 2.0,
            cooperate_cost: 3.0,
        }
    }
}

impl LinearPayoffs {
    pub fn defect(&self, defectors: usize) -> f64 {
        self.defect_base - self.defect_cost * defectors as f64
    }

    pub fn cooperate(&self, defectors: usize) -> f64 {
        self.cooperate_base - self.cooperate_cost * defectors as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStrategy {
    Greedy,
    Random,
}

/// What one player did and earned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub player: usize,
    pub choice: ActionChoice,
    pub utility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineOutcome {
    pub strategy: BaselineStrategy,
    pub players: Vec<PlayerOutcome>,
    pub total_utility: f64,
}

impl BaselineOutcome {
    pub fn defector_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.choice == ActionChoice::Defect)
            .count()
    }
}

/// Greedy and random play over the same number of players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub greedy: BaselineOutcome,
    pub random: BaselineOutcome,
}

impl BaselineComparison {
    /// True when mixing in cooperation beat pure greed on total utility.
    pub fn cooperation_paid_off(&self) -> bool {
        self.random.total_utility >= self.greedy.total_utility
    }
}

fn play<F>(
    payoffs: &LinearPayoffs,
    players: usize,
    strategy: BaselineStrategy,
    mut pick: F,
) -> Result<BaselineOutcome>
where
    F: FnMut(f64, f64) -> ActionChoice,
{
    if players == 0 {
        return Err(ArmsError::invalid("baseline needs at least 1 player"));
    }

    let mut defectors = 0;
    let mut outcomes = Vec::with_capacity(players);
    for player in 0..players {
        let cooperate = payoffs.cooperate(defectors);
        let defect = payoffs.defect(defectors);
        let choice = pick(cooperate, defect);
        let utility = match choice {
            ActionChoice::Defect => {
                defectors += 1;
                defect
            }
            ActionChoice::Cooperate => cooperate,
        };
        outcomes.push(PlayerOutcome {
            player,
            choice,
            utility,
        });
    }

    let total_utility = outcomes.iter().map(|o| o.utility).sum();
    Ok(BaselineOutcome {
        strategy,
        players: outcomes,
        total_utility,
    })
}

/// Every player takes whichever payoff is higher right now.
pub fn play_greedy(payoffs: &LinearPayoffs, players: usize) -> Result<BaselineOutcome> {
    play(payoffs, players, BaselineStrategy::Greedy, |cooperate, defect| {
        if defect > cooperate {
            ActionChoice::Defect
        } else {
            ActionChoice::Cooperate
        }
    })
}

/// Every player flips a fair coin.
pub fn play_random<R: Rng>(payoffs: &LinearPayoffs, players: usize, rng: &mut R) -> Result<BaselineOutcome> {
    play(payoffs, players, BaselineStrategy::Random, |_, _| {
        if rng.gen_bool(0.5) {
            ActionChoice::Defect
        } else {
            ActionChoice::Cooperate
        }
    })
}

pub fn compare<R: Rng>(payoffs: &LinearPayoffs, players: usize, rng: &mut R) -> Result<BaselineComparison> {
    Ok(BaselineComparison {
        greedy: play_greedy(payoffs, players)?,
        random: play_random(payoffs, players, rng)?,
    })
}
