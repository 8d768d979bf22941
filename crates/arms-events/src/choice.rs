//! Action Choice
//!
//! The two moves available to every agent, and their numeric encoding.
//!
//! # Example
//!
//! ```
//! use arms_events::ActionChoice;
//!
//! assert_eq!(ActionChoice::Cooperate.encoding(), 0.0);
//! assert_eq!(ActionChoice::Defect.to_string(), "defect");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an agent does with its arsenal this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionChoice {
    /// Reduce arms
    Cooperate,
    /// Build arms
    Defect,
}

impl ActionChoice {
    /// Both actions, cooperate first.
    pub const ALL: [ActionChoice; 2] = [ActionChoice::Cooperate, ActionChoice::Defect];

    /// Numeric value fed into the response model (0 = cooperate, 1 = defect).
    pub fn encoding(self) -> f64 {
        match self {
            ActionChoice::Cooperate => 0.0,
            ActionChoice::Defect => 1.0,
        }
    }

    pub fn is_cooperate(self) -> bool {
        matches!(self, ActionChoice::Cooperate)
    }

    /// Present-tense verb for narration ("cooperates", "defects").
    pub fn verb(self) -> &'static str {
        match self {
            ActionChoice::Cooperate => "cooperates",
            ActionChoice::Defect => "defects",
        }
    }
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionChoice::Cooperate => write!(f, "cooperate"),
            ActionChoice::Defect => write!(f, "defect"),
        }
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChoiceError(pub String);

impl fmt::Display for ParseChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}', expected cooperate or defect", self.0)
    }
}

impl std::error::Error for ParseChoiceError {}

impl FromStr for ActionChoice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cooperate" | "c" => Ok(ActionChoice::Cooperate),
            "defect" | "d" => Ok(ActionChoice::Defect),
            _ => Err(ParseChoiceError(s.to_string())),
        }
    }
}
