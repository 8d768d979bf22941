//! Console Narration
//!
//! Plain-text rendering of decisions for a terminal. Nations are numbered
//! from 1 for readers.

use std::fmt::Write;

use arms_events::{ActionChoice, DecisionRecord, PhaseReport, RunReport};

use crate::baseline::{BaselineComparison, BaselineOutcome, BaselineStrategy};

fn percent(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 100.0
}

/// Narrates one agent's decision.
pub fn render_decision(record: &DecisionRecord) -> String {
    let nation = record.agent + 1;
    let mut out = String::new();
    for action in ActionChoice::ALL {
        let outlook = record.cooperation_summary.outlook(action);
        let _ = writeln!(
            out,
            "  If nation {} {}, all others cooperate with {}% and all others defect with {}% (expected cooperators {:.2})",
            nation,
            action.verb(),
            percent(outlook.all_cooperate),
            percent(outlook.all_defect),
            outlook.expected_cooperators
        );
    }
    let _ = writeln!(
        out,
        "  Expected utility: cooperate {:.2}, defect {:.2}",
        record.expected_utility_cooperate, record.expected_utility_defect
    );
    let _ = writeln!(out, "  Nation {} {}", nation, record.chosen_action.verb());
    out
}

/// Narrates every round of a phase.
pub fn render_phase(phase: &PhaseReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} [{}] ==", phase.name, phase.phase_id);
    if !phase.description.is_empty() {
        let _ = writeln!(out, "{}", phase.description);
    }
    let _ = writeln!(out, "Mechanism: {}", phase.mechanism);

    for round in &phase.rounds {
        let _ = writeln!(out);
        let _ = writeln!(out, "Round {}", round.round);
        for record in &round.decisions {
            let _ = writeln!(out, "Nation {}'s turn...", record.agent + 1);
            out.push_str(&render_decision(record));
        }
        let _ = writeln!(
            out,
            "Round {}: {} of {} nations cooperated",
            round.round,
            round.cooperator_count,
            round.decisions.len()
        );
    }
    out
}

/// Narrates a full run followed by a per-phase tally.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Arms race simulation {}", report.run_id);
    let _ = writeln!(out, "Seed: {}", report.seed);
    let _ = writeln!(out, "Nations: {}", report.agent_count);

    for phase in &report.phases {
        let _ = writeln!(out);
        out.push_str(&render_phase(phase));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Cooperators per round:");
    for phase in &report.phases {
        let counts: Vec<String> = phase
            .cooperators_per_round()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let _ = writeln!(out, "  {:<24} {}", phase.name, counts.join(" "));
    }
    out
}

fn render_outcome(out: &mut String, outcome: &BaselineOutcome) {
    let title = match outcome.strategy {
        BaselineStrategy::Greedy => "Greedy: each player picks the best option for themselves",
        BaselineStrategy::Random => "Random: each player flips a coin",
    };
    let _ = writeln!(out, "{}", title);
    for player in &outcome.players {
        let _ = writeln!(
            out,
            "  Player {} {}, utility {}",
            player.player + 1,
            player.choice.verb(),
            player.utility
        );
    }
    let _ = writeln!(out, "  Total utility: {}", outcome.total_utility);
}

/// Narrates the greedy vs random comparison.
pub fn render_baseline(comparison: &BaselineComparison) -> String {
    let mut out = String::new();
    render_outcome(&mut out, &comparison.greedy);
    let _ = writeln!(out);
    render_outcome(&mut out, &comparison.random);
    let _ = writeln!(out);
    if comparison.cooperation_paid_off() {
        let _ = writeln!(out, "Some players cooperating produced at least as much total utility as pure greed.");
    } else {
        let _ = writeln!(out, "This time greed produced more total utility. Run again with another seed.");
    }
    out
}
