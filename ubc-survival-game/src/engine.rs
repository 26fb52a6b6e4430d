//! Turn engine owning the lifecycle of one playthrough.

use log::debug;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::catalog;
use crate::constants::{STAT_MIN, TURN_CAP};
use crate::data::{Event, EventCatalog};
use crate::eligibility::is_eligible;
use crate::ending::{Ending, RunSummary, classify};
use crate::profile::{ProfileCatalog, SetupChoices};
use crate::state::{HistoryEntry, RunPhase, RunState, Stats};

/// Errors refusing to start a run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("{field} selection is empty")]
    MissingSelection { field: &'static str },
}

/// Errors surfaced by the engine's fail-fast contract checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// `choose` was called while no event is being presented.
    #[error("no event is currently presented (phase {phase:?})")]
    NoActiveEvent { phase: RunPhase },
    /// The chosen option index does not exist on the presented event.
    #[error("event `{event}` has {available} options (chose index {index})")]
    ChoiceOutOfRange {
        event: String,
        index: usize,
        available: usize,
    },
}

/// Result of resolving one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The run continues; the next eligible event is being presented.
    Continued { response: String },
    /// Survival hit zero; the run is over.
    Defeated { response: String },
    /// The semester finished and the classifier picked an ending.
    Completed { response: String, ending: Ending },
}

impl TurnOutcome {
    /// Response message of the resolved choice, for the display layer.
    #[must_use]
    pub fn response(&self) -> &str {
        match self {
            Self::Continued { response }
            | Self::Defeated { response }
            | Self::Completed { response, .. } => response,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continued { .. })
    }
}

/// Session binding the immutable catalogs to one mutable run.
///
/// Exactly one run is active per session; `start_run` implicitly resets
/// any previous run. Every operation is a synchronous state transition
/// that completes before the next input is accepted.
#[derive(Debug, Clone)]
pub struct GameSession {
    events: EventCatalog,
    profiles: ProfileCatalog,
    seed: u64,
    rng: ChaCha20Rng,
    run: RunState,
}

impl GameSession {
    /// Construct a session over the built-in catalogs.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_data(
            catalog::builtin_events().clone(),
            catalog::builtin_profiles().clone(),
            seed,
        )
    }

    /// Construct a session over caller-provided catalogs.
    #[must_use]
    pub fn with_data(events: EventCatalog, profiles: ProfileCatalog, seed: u64) -> Self {
        Self {
            events,
            profiles,
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            run: RunState::default(),
        }
    }

    /// Deterministically reseed the session; affects the next `start_run`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn events(&self) -> &EventCatalog {
        &self.events
    }

    #[must_use]
    pub const fn profiles(&self) -> &ProfileCatalog {
        &self.profiles
    }

    #[must_use]
    pub const fn run(&self) -> &RunState {
        &self.run
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.run.phase
    }

    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.run.stats
    }

    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.run.flags
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.run.history
    }

    /// Result summary, available once the run is terminal.
    #[must_use]
    pub fn summary(&self) -> Option<RunSummary> {
        RunSummary::from_run(&self.run)
    }

    /// Begin a fresh run from the three setup selections.
    ///
    /// Starting stats are the baseline composed with each table's deltas
    /// and clamped once; the whole catalog is shuffled uniformly for the
    /// run; the cursor seeks the first eligible event. A catalog with no
    /// eligible event completes the run immediately.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::MissingSelection` while any selection is
    /// empty; the previous run, if any, is left untouched.
    pub fn start_run(&mut self, choices: &SetupChoices) -> Result<(), SetupError> {
        for (field, value) in [
            ("faculty", &choices.faculty),
            ("year", &choices.year),
            ("vibe", &choices.vibe),
        ] {
            if value.is_empty() {
                return Err(SetupError::MissingSelection { field });
            }
        }

        let mut run = RunState {
            stats: self.profiles.starting_stats(choices),
            ..RunState::default()
        };
        let mut order: Vec<usize> = (0..self.events.len()).collect();
        order.shuffle(&mut self.rng);
        run.order = order;

        if let Some(pos) = scan_eligible(&self.events, &run, 0) {
            run.cursor = pos;
            run.phase = RunPhase::Presenting;
            debug!(
                "run started (seed {}): presenting position {pos}",
                self.seed
            );
        } else {
            run.phase = RunPhase::Completed;
            debug!("run started (seed {}) with no eligible event", self.seed);
        }
        self.run = run;
        Ok(())
    }

    /// Event currently presented, or `None` in setup and terminal phases.
    #[must_use]
    pub fn current_event(&self) -> Option<&Event> {
        if self.run.phase != RunPhase::Presenting {
            return None;
        }
        self.run
            .order
            .get(self.run.cursor)
            .and_then(|&idx| self.events.events.get(idx))
    }

    /// Resolve the player's choice on the presented event.
    ///
    /// Effects apply in listed order, each clamped as it lands; flag
    /// additions apply before removals; exactly one history entry is
    /// appended per accepted call. The death check precedes the
    /// completion check, so a lethal option always defeats the run even
    /// when the turn cap was also reached.
    ///
    /// # Errors
    ///
    /// Fails fast, without touching the run, when no event is presented
    /// (`NoActiveEvent`) or the index is invalid (`ChoiceOutOfRange`).
    pub fn choose(&mut self, index: usize) -> Result<TurnOutcome, EngineError> {
        let (event_title, choice) = {
            let Some(event) = self.current_event() else {
                return Err(EngineError::NoActiveEvent {
                    phase: self.run.phase,
                });
            };
            match event.options.get(index) {
                Some(choice) => (event.title.clone(), choice.clone()),
                None => {
                    return Err(EngineError::ChoiceOutOfRange {
                        event: event.id.clone(),
                        index,
                        available: event.options.len(),
                    });
                }
            }
        };

        for effect in &choice.effects {
            self.run.stats.apply(*effect);
        }
        for flag in &choice.add_flags {
            self.run.add_flag(flag);
        }
        for flag in &choice.remove_flags {
            self.run.remove_flag(flag);
        }

        let turn = u32::try_from(self.run.history.len() + 1).unwrap_or(u32::MAX);
        self.run.history.push(HistoryEntry {
            turn,
            event_title,
            choice_text: choice.text.clone(),
            response: choice.response.clone(),
        });

        if self.run.stats.survival <= STAT_MIN {
            self.run.phase = RunPhase::Defeated;
            debug!("run defeated on turn {turn}");
            return Ok(TurnOutcome::Defeated {
                response: choice.response,
            });
        }

        if self.run.history.len() >= TURN_CAP {
            return Ok(self.complete(choice.response));
        }

        match scan_eligible(&self.events, &self.run, self.run.cursor + 1) {
            Some(pos) => {
                self.run.cursor = pos;
                Ok(TurnOutcome::Continued {
                    response: choice.response,
                })
            }
            None => Ok(self.complete(choice.response)),
        }
    }

    fn complete(&mut self, response: String) -> TurnOutcome {
        self.run.phase = RunPhase::Completed;
        let ending = classify(&self.run.stats, &self.run.flags);
        debug!(
            "run completed after {} turns: {ending}",
            self.run.history.len()
        );
        TurnOutcome::Completed { response, ending }
    }
}

/// First eligible position in shuffle order at or after `from`,
/// re-evaluated against the run state as it stands now.
fn scan_eligible(events: &EventCatalog, run: &RunState, from: usize) -> Option<usize> {
    run.order
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(pos, &idx)| {
            events
                .events
                .get(idx)
                .filter(|event| is_eligible(event, &run.stats, &run.flags))
                .map(|_| pos)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Choice, Condition, Effect, Stat, StatGate};

    fn choice(text: &str, effects: &[(Stat, i32)]) -> Choice {
        Choice {
            text: text.to_string(),
            effects: effects
                .iter()
                .map(|&(stat, amount)| Effect { stat, amount })
                .collect(),
            add_flags: Vec::new(),
            remove_flags: Vec::new(),
            response: format!("resolved {text}"),
        }
    }

    fn event(id: &str, options: Vec<Choice>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: String::new(),
            weight: 1,
            conditions: None,
            options,
        }
    }

    fn neutral_event(id: &str) -> Event {
        event(
            id,
            vec![
                choice("steady", &[(Stat::Serotonin, 1)]),
                choice("risky", &[(Stat::Chaos, 5)]),
            ],
        )
    }

    fn session(events: Vec<Event>, seed: u64) -> GameSession {
        GameSession::with_data(
            EventCatalog::from_events(events),
            ProfileCatalog::empty(),
            seed,
        )
    }

    fn complete_choices() -> SetupChoices {
        SetupChoices::new("Science", "1st Year", "Ghost")
    }

    #[test]
    fn start_run_refuses_incomplete_setup() {
        let mut session = session(vec![neutral_event("a")], 1);
        let err = session
            .start_run(&SetupChoices::new("Science", "", "Ghost"))
            .unwrap_err();
        assert_eq!(err, SetupError::MissingSelection { field: "year" });
        assert_eq!(session.phase(), RunPhase::Setup);
        assert!(session.current_event().is_none());
    }

    #[test]
    fn empty_catalog_completes_immediately() {
        let mut session = session(Vec::new(), 7);
        session.start_run(&complete_choices()).unwrap();
        assert_eq!(session.phase(), RunPhase::Completed);
        assert!(session.current_event().is_none());
        assert_eq!(session.summary().unwrap().turns, 0);
    }

    #[test]
    fn choose_appends_history_and_advances() {
        let mut session = session(vec![neutral_event("a"), neutral_event("b")], 3);
        session.start_run(&complete_choices()).unwrap();
        let first = session.current_event().unwrap().id.clone();

        let outcome = session.choose(0).unwrap();
        assert!(matches!(outcome, TurnOutcome::Continued { .. }));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].turn, 1);
        assert_ne!(session.current_event().unwrap().id, first);

        let outcome = session.choose(0).unwrap();
        assert!(outcome.is_terminal());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.phase(), RunPhase::Completed);
    }

    #[test]
    fn choose_skips_ineligible_events() {
        let mut gated = neutral_event("gated");
        gated.conditions = Some(Condition {
            min_stat: Some(StatGate {
                stat: Stat::Chaos,
                value: 90,
            }),
            ..Condition::default()
        });
        // Whatever the shuffle order, the gated event is never presented.
        for seed in 0..8 {
            let mut session = session(
                vec![neutral_event("a"), gated.clone(), neutral_event("b")],
                seed,
            );
            session.start_run(&complete_choices()).unwrap();
            while session.phase() == RunPhase::Presenting {
                assert_ne!(session.current_event().unwrap().id, "gated");
                session.choose(0).unwrap();
            }
        }
    }

    #[test]
    fn lethal_choice_defeats_before_completion() {
        // A single event whose only resolution empties survival: the turn
        // would also exhaust the catalog, but death wins.
        let lethal = event(
            "lethal",
            vec![
                choice("doom", &[(Stat::Survival, -200), (Stat::Serotonin, 90)]),
                choice("also doom", &[(Stat::Survival, -200)]),
            ],
        );
        let mut session = session(vec![lethal], 11);
        session.start_run(&complete_choices()).unwrap();
        let outcome = session.choose(0).unwrap();
        assert!(matches!(outcome, TurnOutcome::Defeated { .. }));
        assert_eq!(session.phase(), RunPhase::Defeated);
        assert_eq!(session.stats().survival, 0);
        assert_eq!(session.summary().unwrap().headline, "Wasted");
    }

    #[test]
    fn turn_cap_ends_the_run() {
        let events: Vec<Event> = (0..TURN_CAP + 5)
            .map(|i| neutral_event(&format!("e{i}")))
            .collect();
        let mut session = session(events, 13);
        session.start_run(&complete_choices()).unwrap();
        let mut last = None;
        while session.phase() == RunPhase::Presenting {
            last = Some(session.choose(0).unwrap());
        }
        assert_eq!(session.history().len(), TURN_CAP);
        assert!(matches!(last, Some(TurnOutcome::Completed { .. })));
    }

    #[test]
    fn terminal_runs_reject_further_choices() {
        let mut session = session(vec![neutral_event("only")], 17);
        session.start_run(&complete_choices()).unwrap();
        session.choose(0).unwrap();
        assert!(session.phase().is_terminal());

        let err = session.choose(0).unwrap_err();
        assert_eq!(
            err,
            EngineError::NoActiveEvent {
                phase: RunPhase::Completed
            }
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn out_of_range_choice_leaves_run_untouched() {
        let mut session = session(vec![neutral_event("a")], 19);
        session.start_run(&complete_choices()).unwrap();
        let err = session.choose(9).unwrap_err();
        assert!(matches!(err, EngineError::ChoiceOutOfRange { index: 9, .. }));
        assert_eq!(session.phase(), RunPhase::Presenting);
        assert!(session.history().is_empty());
    }

    #[test]
    fn restart_resets_terminal_state() {
        let mut session = session(vec![neutral_event("a")], 23);
        session.start_run(&complete_choices()).unwrap();
        session.choose(0).unwrap();
        assert!(session.phase().is_terminal());

        session.start_run(&complete_choices()).unwrap();
        assert_eq!(session.phase(), RunPhase::Presenting);
        assert!(session.history().is_empty());
    }
}
