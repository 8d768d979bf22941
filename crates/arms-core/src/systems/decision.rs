//! Decision Loop
//!
//! Each agent, in index order, compares its expected utility for cooperating
//! against defecting and picks the larger. Ties go to defect.
//!
//! The tables are never touched here. The only state carried between agents
//! is the running count of cooperators, which the popularity mechanism reads.

use tracing::{debug, info};

use arms_events::{ActionChoice, CooperationSummary, DecisionRecord, RoundSummary};

use crate::components::ScenarioSnapshot;
use crate::error::{ArmsError, Result};
use crate::systems::expected::ExpectedUtilityEngine;

/// Cooperate only when it is strictly better.
pub fn choose(expected_cooperate: f64, expected_defect: f64) -> ActionChoice {
    if expected_cooperate > expected_defect {
        ActionChoice::Cooperate
    } else {
        ActionChoice::Defect
    }
}

/// Runs decision rounds for one phase over a fixed snapshot.
#[derive(Debug)]
pub struct DecisionLoop<'a> {
    engine: &'a ExpectedUtilityEngine,
    snapshot: &'a ScenarioSnapshot,
    cooperated: usize,
}

impl<'a> DecisionLoop<'a> {
    /// Checks the population up front so no round starts on a bad scenario.
    pub fn new(engine: &'a ExpectedUtilityEngine, snapshot: &'a ScenarioSnapshot) -> Result<Self> {
        engine.check_population(snapshot.agent_count())?;
        Ok(Self {
            engine,
            snapshot,
            cooperated: 0,
        })
    }

    /// Agents that have cooperated so far in this loop.
    pub fn cooperated(&self) -> usize {
        self.cooperated
    }

    /// One agent's decision given `cooperated` earlier cooperators.
    pub fn decide(&self, agent: usize, round: u32, cooperated: usize) -> Result<DecisionRecord> {
        let cooperate = self
            .engine
            .evaluate(self.snapshot, agent, ActionChoice::Cooperate, cooperated)?;
        let defect = self
            .engine
            .evaluate(self.snapshot, agent, ActionChoice::Defect, cooperated)?;
        let chosen_action = choose(cooperate.expected_utility, defect.expected_utility);

        debug!(
            "round {} agent {}: cooperate {:.2} vs defect {:.2} -> {}",
            round, agent, cooperate.expected_utility, defect.expected_utility, chosen_action
        );

        Ok(DecisionRecord {
            agent,
            round,
            expected_utility_cooperate: cooperate.expected_utility,
            expected_utility_defect: defect.expected_utility,
            chosen_action,
            cooperation_summary: CooperationSummary {
                if_cooperate: cooperate.outlook,
                if_defect: defect.outlook,
            },
        })
    }

    /// Every agent decides once. The cooperator count only advances if the
    /// whole round succeeds.
    pub fn run_round(&mut self, round: u32) -> Result<RoundSummary> {
        let mut cooperated = self.cooperated;
        let mut decisions = Vec::with_capacity(self.snapshot.agent_count());
        for agent in 0..self.snapshot.agent_count() {
            let record = self.decide(agent, round, cooperated)?;
            if record.chosen_action.is_cooperate() {
                cooperated += 1;
            }
            decisions.push(record);
        }
        self.cooperated = cooperated;

        let summary = RoundSummary::new(round, decisions);
        info!(
            "round {}: {} of {} agents cooperated",
            round,
            summary.cooperator_count,
            summary.decisions.len()
        );
        Ok(summary)
    }

    /// Runs rounds `1..=rounds`.
    pub fn run_rounds(&mut self, rounds: u32) -> Result<Vec<RoundSummary>> {
        if rounds == 0 {
            return Err(ArmsError::invalid("round count must be at least 1"));
        }
        (1..=rounds).map(|round| self.run_round(round)).collect()
    }
}
