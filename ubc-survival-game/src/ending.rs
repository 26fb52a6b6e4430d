//! End-of-run classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FLAG_PARTY_ANIMAL, FLAG_RACCOON_FRIEND};
use crate::state::{RunPhase, RunState, Stats};

/// Ending labels awarded at the completed terminal, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    ProbationVictim,
    CampusMenace,
    VibeCurator,
    DeansListLegend,
    FunctionalPartyAnimal,
    RaccoonWhisperer,
    AverageStudent,
}

impl Ending {
    /// Display label shown on the result screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProbationVictim => "Academic Probation Victim",
            Self::CampusMenace => "Campus Menace",
            Self::VibeCurator => "Vibe Curator",
            Self::DeansListLegend => "Dean's List Legend",
            Self::FunctionalPartyAnimal => "Functional Party Animal",
            Self::RaccoonWhisperer => "Raccoon Whisperer",
            Self::AverageStudent => "Average UBC Student",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Select the ending by strict priority; the first matching rule wins.
///
/// Only the completed terminal consults this. A defeated run reports the
/// fixed defeated outcome regardless of its other stats.
#[must_use]
pub fn classify(stats: &Stats, flags: &[String]) -> Ending {
    let has = |flag: &str| flags.iter().any(|f| f == flag);
    if stats.survival < 20 {
        return Ending::ProbationVictim;
    }
    if stats.chaos > 80 {
        return Ending::CampusMenace;
    }
    if stats.serotonin > 80 {
        return Ending::VibeCurator;
    }
    if stats.survival > 80 && stats.serotonin > 60 {
        return Ending::DeansListLegend;
    }
    if has(FLAG_PARTY_ANIMAL) && stats.survival > 50 {
        return Ending::FunctionalPartyAnimal;
    }
    if has(FLAG_RACCOON_FRIEND) {
        return Ending::RaccoonWhisperer;
    }
    Ending::AverageStudent
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Survival hit zero mid-semester.
    Defeated,
    /// The semester finished and the classifier picked an ending.
    Completed { ending: Ending },
}

impl RunOutcome {
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Defeated => "Wasted",
            Self::Completed { ending } => ending.label(),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Summary of a finished run for the result surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub headline: String,
    pub stats: Stats,
    pub turns: usize,
    pub flags: Vec<String>,
}

impl RunSummary {
    /// Build a summary from a terminal run state; `None` while the run
    /// is still in progress.
    #[must_use]
    pub fn from_run(run: &RunState) -> Option<Self> {
        let outcome = match run.phase {
            RunPhase::Defeated => RunOutcome::Defeated,
            RunPhase::Completed => RunOutcome::Completed {
                ending: classify(&run.stats, &run.flags),
            },
            RunPhase::Setup | RunPhase::Presenting => return None,
        };
        Some(Self {
            outcome,
            headline: outcome.headline().to_string(),
            stats: run.stats,
            turns: run.turns(),
            flags: run.flags.clone(),
        })
    }
}
