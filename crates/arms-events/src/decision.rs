//! Decision Types
//!
//! Per-agent, per-round results of the expected-utility comparison.

use serde::{Deserialize, Serialize};

use crate::ActionChoice;

/// How an agent expects its peers to respond to one of its actions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseOutlook {
    /// Probability that every peer cooperates
    pub all_cooperate: f64,
    /// Probability that every peer defects
    pub all_defect: f64,
    /// Expected number of cooperating peers
    pub expected_cooperators: f64,
}

/// Peer response outlooks for both of the acting agent's actions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CooperationSummary {
    pub if_cooperate: ResponseOutlook,
    pub if_defect: ResponseOutlook,
}

impl CooperationSummary {
    /// Returns the outlook for the given action.
    pub fn outlook(&self, action: ActionChoice) -> &ResponseOutlook {
        match action {
            ActionChoice::Cooperate => &self.if_cooperate,
            ActionChoice::Defect => &self.if_defect,
        }
    }
}

/// One agent's decision in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub agent: usize,
    pub round: u32,
    pub expected_utility_cooperate: f64,
    pub expected_utility_defect: f64,
    pub chosen_action: ActionChoice,
    pub cooperation_summary: CooperationSummary,
}

impl DecisionRecord {
    /// Expected utility of the chosen action.
    pub fn chosen_utility(&self) -> f64 {
        match self.chosen_action {
            ActionChoice::Cooperate => self.expected_utility_cooperate,
            ActionChoice::Defect => self.expected_utility_defect,
        }
    }

    /// Cooperate minus defect expected utility.
    pub fn margin(&self) -> f64 {
        self.expected_utility_cooperate - self.expected_utility_defect
    }
}

/// All decisions made in one round, in agent index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub decisions: Vec<DecisionRecord>,
    pub cooperator_count: usize,
}

impl RoundSummary {
    /// Builds a summary, counting cooperators from the decisions.
    pub fn new(round: u32, decisions: Vec<DecisionRecord>) -> Self {
        let cooperator_count = decisions
            .iter()
            .filter(|d| d.chosen_action.is_cooperate())
            .count();
        Self {
            round,
            decisions,
            cooperator_count,
        }
    }

    pub fn defector_count(&self) -> usize {
        self.decisions.len() - self.cooperator_count
    }

    /// Fraction of agents that cooperated (0.0 for an empty round).
    pub fn cooperation_rate(&self) -> f64 {
        if self.decisions.is_empty() {
            return 0.0;
        }
        self.cooperator_count as f64 / self.decisions.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(agent: usize, coop: f64, defect: f64, chosen: ActionChoice) -> DecisionRecord {
        DecisionRecord {
            agent,
            round: 1,
            expected_utility_cooperate: coop,
            expected_utility_defect: defect,
            chosen_action: chosen,
            cooperation_summary: CooperationSummary::default(),
        }
    }

    #[test]
    fn test_round_summary_counts() {
        let summary = RoundSummary::new(
            1,
            vec![
                record(0, 10.0, 12.0, ActionChoice::Defect),
                record(1, 14.0, 12.0, ActionChoice::Cooperate),
                record(2, 9.0, 9.0, ActionChoice::Defect),
            ],
        );

        assert_eq!(summary.cooperator_count, 1);
        assert_eq!(summary.defector_count(), 2);
        assert!((summary.cooperation_rate() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_round_rate() {
        let summary = RoundSummary::new(1, Vec::new());
        assert_eq!(summary.cooperation_rate(), 0.0);
    }

    #[test]
    fn test_chosen_utility() {
        let r = record(0, 3.5, 7.25, ActionChoice::Defect);
        assert_eq!(r.chosen_utility(), 7.25);
        assert_eq!(r.margin(), -3.75);
    }

    #[test]
    fn test_record_serialization() {
        let r = record(2, 1.0, 2.0, ActionChoice::Defect);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"chosen_action\":\"defect\""));
        assert!(json.contains("\"if_cooperate\""));

        let parsed: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }
}
