//! Arms Race Simulation
//!
//! Runs the expected-utility phases, the greedy vs random baseline, or prints
//! the default configuration.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use arms_core::baseline;
use arms_core::config::{default_config_toml, DEFAULT_CONFIG_PATH};
use arms_core::output::{render_baseline, render_report, write_json};
use arms_core::{ArmsConfig, Result, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "arms_race")]
#[command(about = "Expected-utility arms race between nations")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every configured phase and narrate the decisions
    Run {
        /// Configuration file (defaults to arms_race.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Number of nations
        #[arg(long)]
        agents: Option<usize>,

        /// Decision rounds per phase
        #[arg(long)]
        rounds: Option<u32>,

        /// Largest population the engine accepts
        #[arg(long)]
        max_agents: Option<usize>,

        /// Also write the run report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Compare greedy and random play in the linear dilemma
    Baseline {
        /// Configuration file supplying the linear payoffs
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of players
        #[arg(long, default_value_t = 5)]
        players: usize,

        /// Random seed for the coin flips
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

fn load_config(path: Option<PathBuf>) -> Result<ArmsConfig> {
    match path {
        Some(path) => Ok(ArmsConfig::from_file(path)?),
        None => Ok(ArmsConfig::load_or_default(DEFAULT_CONFIG_PATH)),
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run {
            config,
            seed,
            agents,
            rounds,
            max_agents,
            json,
        } => {
            let mut config = load_config(config)?;
            let sim = &mut config.simulation;
            if let Some(seed) = seed {
                sim.seed = seed;
            }
            if let Some(agents) = agents {
                sim.agent_count = agents;
            }
            if let Some(rounds) = rounds {
                sim.rounds = rounds;
            }
            if let Some(max_agents) = max_agents {
                sim.max_agents = max_agents;
            }

            let mut simulation = Simulation::new(config)?;
            let report = simulation.run()?;
            print!("{}", render_report(&report));

            if let Some(path) = json {
                write_json(&report, &path)?;
                info!("Wrote report to {}", path.display());
            }
        }
        Command::Baseline {
            config,
            players,
            seed,
        } => {
            let config = load_config(config)?;
            let mut rng = SmallRng::seed_from_u64(seed);
            let comparison = baseline::compare(&config.baseline, players, &mut rng)?;
            print!("{}", render_baseline(&comparison));
        }
        Command::DefaultConfig => {
            print!("{}", default_config_toml()?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_accepts_config() {
        let args = Args::try_parse_from([
            "arms_race",
            "baseline",
            "--config",
            "custom.toml",
            "--players",
            "3",
        ])
        .unwrap();
        match args.command {
            Command::Baseline {
                config, players, ..
            } => {
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
                assert_eq!(players, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_explicit_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payoffs.toml");
        std::fs::write(&path, "[baseline]\ncooperate_base = 12.0\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.baseline.cooperate_base, 12.0);

        let missing = load_config(Some(dir.path().join("absent.toml")));
        assert!(missing.is_err());
    }
}
