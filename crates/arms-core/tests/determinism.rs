//! Determinism verification tests
//!
//! Same seed, same tables, same decisions, same narration.

use arms_core::output::render_report;
use arms_core::{ArmsConfig, Simulation};

fn config(seed: u64) -> ArmsConfig {
    let mut config = ArmsConfig::default();
    config.simulation.seed = seed;
    config.simulation.agent_count = 6;
    config.simulation.rounds = 2;
    config
}

#[test]
fn test_same_seed_same_report() {
    let first = Simulation::new(config(42)).unwrap().run().unwrap();
    let second = Simulation::new(config(42)).unwrap().run().unwrap();

    assert_eq!(first, second, "Runs should be identical with same seed");
    assert_eq!(render_report(&first), render_report(&second));
}

#[test]
fn test_different_seeds_differ() {
    let first = Simulation::new(config(42)).unwrap().run().unwrap();
    let second = Simulation::new(config(43)).unwrap().run().unwrap();

    let utilities = |report: &arms_events::RunReport| -> Vec<f64> {
        report
            .phases
            .iter()
            .flat_map(|p| &p.rounds)
            .flat_map(|r| &r.decisions)
            .map(|d| d.expected_utility_cooperate)
            .collect()
    };
    assert_ne!(utilities(&first), utilities(&second));
}

#[test]
fn test_config_file_drives_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arms_race.toml");
    std::fs::write(&path, config(8).to_toml().unwrap()).unwrap();

    let loaded = ArmsConfig::from_file(&path).unwrap();
    let from_file = Simulation::new(loaded).unwrap().run().unwrap();
    let direct = Simulation::new(config(8)).unwrap().run().unwrap();
    assert_eq!(from_file, direct);
}
