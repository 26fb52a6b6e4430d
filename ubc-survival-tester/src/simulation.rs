use anyhow::{Context, Result};
use log::debug;
use ubc_survival_game::constants::TURN_CAP;
use ubc_survival_game::{GameSession, RunOutcome, RunPhase, RunSummary, SetupChoices, Stats};

use crate::policy::Strategy;

/// Configuration for one automated run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: Strategy,
    pub choices: SetupChoices,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(seed: u64, strategy: Strategy, choices: SetupChoices) -> Self {
        Self {
            seed,
            strategy,
            choices,
        }
    }
}

/// Snapshot of one resolved turn.
#[derive(Debug, Clone)]
pub struct DecisionRecord {
    pub turn: usize,
    pub event_id: String,
    pub choice_index: usize,
    pub choice_text: String,
    pub rationale: Option<String>,
}

/// Full record of one automated playthrough.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub seed: u64,
    pub strategy: Strategy,
    pub outcome: RunOutcome,
    pub headline: String,
    pub final_stats: Stats,
    pub turns: usize,
    pub flags: Vec<String>,
    pub decisions: Vec<DecisionRecord>,
    /// Invariant breaches observed while driving the run; empty on a
    /// healthy engine.
    pub violations: Vec<String>,
}

/// Drive one run from setup to a terminal state under the configured
/// strategy, checking engine invariants at every transition.
///
/// # Errors
///
/// Returns an error if the run cannot start or fails to terminate
/// within the turn cap.
pub fn run_simulation(config: &SimulationConfig) -> Result<RunRecord> {
    let mut session = GameSession::new(config.seed);
    let mut policy = config.strategy.create_policy(config.seed);
    session
        .start_run(&config.choices)
        .with_context(|| format!("starting run for seed {}", config.seed))?;

    let mut violations = Vec::new();
    let mut decisions = Vec::new();
    check_stats(session.stats(), 0, &mut violations);

    let mut guard = 0usize;
    while session.phase() == RunPhase::Presenting {
        guard += 1;
        anyhow::ensure!(
            guard <= TURN_CAP + 1,
            "run failed to terminate within the turn cap (seed {})",
            config.seed
        );

        let event = session
            .current_event()
            .context("presenting phase without a current event")?;
        let event_id = event.id.clone();
        let decision = policy.pick_choice(event);
        let turns_before = session.history().len();

        let outcome = session
            .choose(decision.choice_index)
            .with_context(|| format!("choosing on event `{event_id}`"))?;
        debug!(
            "seed {} turn {} `{event_id}` -> {} ({:?})",
            config.seed,
            turns_before + 1,
            outcome.response(),
            decision.rationale
        );

        check_stats(session.stats(), turns_before + 1, &mut violations);
        if session.history().len() != turns_before + 1 {
            violations.push(format!(
                "history grew by {} on turn {}",
                session.history().len() - turns_before,
                turns_before + 1
            ));
        }
        if session.history().len() > TURN_CAP {
            violations.push(format!("history exceeded cap: {}", session.history().len()));
        }

        decisions.push(DecisionRecord {
            turn: turns_before + 1,
            event_id,
            choice_index: decision.choice_index,
            choice_text: event_choice_text(&session, turns_before),
            rationale: decision.rationale,
        });
    }

    // Terminal exclusivity: a finished run must reject further choices.
    if session.choose(0).is_ok() {
        violations.push("terminal run accepted a further choice".to_string());
    }

    let RunSummary {
        outcome,
        headline,
        stats,
        turns,
        flags,
    } = session.summary().context("terminal run without summary")?;

    Ok(RunRecord {
        seed: config.seed,
        strategy: config.strategy,
        outcome,
        headline,
        final_stats: stats,
        turns,
        flags,
        decisions,
        violations,
    })
}

fn event_choice_text(session: &GameSession, turn_index: usize) -> String {
    session
        .history()
        .get(turn_index)
        .map_or_else(String::new, |entry| entry.choice_text.clone())
}

fn check_stats(stats: &Stats, turn: usize, violations: &mut Vec<String>) {
    for (label, value) in [
        ("survival", stats.survival),
        ("serotonin", stats.serotonin),
        ("chaos", stats.chaos),
    ] {
        if !(0..=100).contains(&value) {
            violations.push(format!("{label} out of bounds on turn {turn}: {value}"));
        }
    }
}
