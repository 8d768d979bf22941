//! Simulation Runner
//!
//! Drives a full run: validate the configuration, then for each phase sample
//! fresh tables, build the engine for the phase's mechanism, and run the
//! decision rounds.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, info_span};

use arms_events::{generate_phase_id, PhaseReport, RunReport};

use crate::baseline::{self, BaselineComparison};
use crate::components::ScenarioSnapshot;
use crate::config::ArmsConfig;
use crate::error::Result;
use crate::setup::PhaseSpec;
use crate::systems::{DecisionLoop, ExpectedUtilityEngine, ResponseModel};

/// Seeded, single-threaded simulation.
pub struct Simulation {
    config: ArmsConfig,
    model: ResponseModel,
    rng: SmallRng,
}

impl Simulation {
    /// Validates `config` and seeds the RNG from it.
    pub fn new(config: ArmsConfig) -> Result<Self> {
        config.validate()?;
        let model = ResponseModel::new(config.response)?;
        let rng = SmallRng::seed_from_u64(config.simulation.seed);
        Ok(Self { config, model, rng })
    }

    pub fn config(&self) -> &ArmsConfig {
        &self.config
    }

    /// Engine for one phase's mechanism.
    pub fn engine_for(&self, phase: &PhaseSpec) -> Result<ExpectedUtilityEngine> {
        ExpectedUtilityEngine::new(
            self.model,
            self.config.payoffs.utility_functions(phase.mechanism),
            self.config.simulation.max_agents,
        )
    }

    /// Runs every configured phase in order.
    pub fn run(&mut self) -> Result<RunReport> {
        let sim = &self.config.simulation;
        let mut report = RunReport::new(sim.seed, sim.agent_count);
        info!(
            "Starting run {} with {} agents over {} phases",
            report.run_id,
            sim.agent_count,
            self.config.phases.len()
        );

        let phases = self.config.phases.clone();
        for (index, phase) in phases.iter().enumerate() {
            let phase_report = self.run_phase(index + 1, phase)?;
            report.phases.push(phase_report);
        }
        Ok(report)
    }

    /// Samples tables for `phase` and runs its rounds.
    pub fn run_phase(&mut self, sequence: usize, phase: &PhaseSpec) -> Result<PhaseReport> {
        let _span = info_span!("phase", name = %phase.name).entered();
        phase.validate()?;

        let agent_count = self.config.simulation.agent_count;
        let engine = self.engine_for(phase)?;
        engine.check_population(agent_count)?;
        let snapshot = phase.sample_snapshot(agent_count, &mut self.rng)?;
        info!(
            "Sampled tables: mean reputation {:.3}, mechanism {}",
            snapshot.reputations().mean(),
            phase.mechanism
        );

        let rounds = phase.rounds_or(self.config.simulation.rounds);
        let summaries = run_snapshot(&engine, &snapshot, rounds)?;

        Ok(PhaseReport {
            phase_id: generate_phase_id(sequence),
            name: phase.name.clone(),
            description: phase.description.clone(),
            mechanism: phase.mechanism.to_string(),
            agent_count,
            rounds: summaries,
        })
    }

    /// Greedy vs random baseline with this run's player count and RNG.
    pub fn run_baseline(&mut self) -> Result<BaselineComparison> {
        baseline::compare(
            &self.config.baseline,
            self.config.simulation.agent_count,
            &mut self.rng,
        )
    }
}

/// Runs `rounds` decision rounds over a fixed snapshot.
pub fn run_snapshot(
    engine: &ExpectedUtilityEngine,
    snapshot: &ScenarioSnapshot,
    rounds: u32,
) -> Result<Vec<arms_events::RoundSummary>> {
    let mut decision_loop = DecisionLoop::new(engine, snapshot)?;
    decision_loop.run_rounds(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SampleBounds;
    use crate::setup::default_phases;
    use crate::systems::Mechanism;

    fn small_config(seed: u64) -> ArmsConfig {
        let mut config = ArmsConfig::default();
        config.simulation.agent_count = 4;
        config.simulation.seed = seed;
        config
    }

    #[test]
    fn test_run_produces_all_phases() {
        let mut sim = Simulation::new(small_config(42)).unwrap();
        let report = sim.run().unwrap();

        assert_eq!(report.agent_count, 4);
        let names: Vec<&str> = report.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["baseline", "trusted_reputations", "improved_relations", "global_support"]
        );
        for phase in &report.phases {
            assert_eq!(phase.rounds.len(), 1);
            assert_eq!(phase.rounds[0].decisions.len(), 4);
        }
        assert_eq!(report.phases[0].phase_id, "phase_01");
        assert_eq!(report.phases[3].mechanism, "flat_subsidy(50)");
    }

    #[test]
    fn test_phase_round_override() {
        let mut config = small_config(1);
        config.phases = vec![default_phases().remove(0).with_rounds(3)];
        let report = Simulation::new(config).unwrap().run().unwrap();
        assert_eq!(report.phases[0].rounds.len(), 3);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let mut config = small_config(1);
        config.simulation.agent_count = 1;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_subsidy_lifts_cooperation() {
        let mut sim = Simulation::new(small_config(7)).unwrap();
        let report = sim.run().unwrap();
        let baseline = report.phase("baseline").unwrap();
        let supported = report.phase("global_support").unwrap();
        assert!(supported.final_cooperators() >= baseline.final_cooperators());
    }

    #[test]
    fn test_baseline_uses_agent_count() {
        let mut sim = Simulation::new(small_config(3)).unwrap();
        let comparison = sim.run_baseline().unwrap();
        assert_eq!(comparison.greedy.players.len(), 4);
        assert_eq!(comparison.random.players.len(), 4);
    }

    #[test]
    fn test_popularity_count_restarts_each_phase() {
        // Degenerate bounds give both phases identical tables.
        let popular = |name: &str| {
            PhaseSpec::new(name, SampleBounds::new(0.0, 0.0), SampleBounds::new(0.9, 0.9))
                .with_mechanism(Mechanism::popularity())
                .with_rounds(2)
        };
        let mut config = small_config(12);
        config.phases = vec![popular("first"), popular("second")];

        let report = Simulation::new(config).unwrap().run().unwrap();
        let first = &report.phases[0];
        let second = &report.phases[1];

        assert!(first.rounds[0].cooperator_count > 0);
        assert!(
            first.rounds[1].decisions[0].expected_utility_cooperate
                < first.rounds[0].decisions[0].expected_utility_cooperate
        );
        assert_eq!(second.rounds, first.rounds);
    }
}
