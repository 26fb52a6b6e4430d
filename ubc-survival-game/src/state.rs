use serde::{Deserialize, Serialize};

use crate::constants::{
    BASELINE_CHAOS, BASELINE_SEROTONIN, BASELINE_SURVIVAL, STAT_MAX, STAT_MIN,
};
use crate::data::{Effect, Stat};

/// The three bounded resources tracked across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub survival: i32,
    pub serotonin: i32,
    pub chaos: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            survival: BASELINE_SURVIVAL,
            serotonin: BASELINE_SEROTONIN,
            chaos: BASELINE_CHAOS,
        }
    }
}

impl Stats {
    #[must_use]
    pub const fn new(survival: i32, serotonin: i32, chaos: i32) -> Self {
        Self {
            survival,
            serotonin,
            chaos,
        }
    }

    #[must_use]
    pub const fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Survival => self.survival,
            Stat::Serotonin => self.serotonin,
            Stat::Chaos => self.chaos,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Survival => &mut self.survival,
            Stat::Serotonin => &mut self.serotonin,
            Stat::Chaos => &mut self.chaos,
        }
    }

    /// Clamp every stat into the playable range.
    pub fn clamp(&mut self) {
        self.survival = self.survival.clamp(STAT_MIN, STAT_MAX);
        self.serotonin = self.serotonin.clamp(STAT_MIN, STAT_MAX);
        self.chaos = self.chaos.clamp(STAT_MIN, STAT_MAX);
    }

    /// Apply one delta, clamping the touched stat immediately so no
    /// out-of-range value is ever observable.
    pub fn apply(&mut self, effect: Effect) {
        let slot = self.slot(effect.stat);
        *slot = (*slot + effect.amount).clamp(STAT_MIN, STAT_MAX);
    }
}

/// Phase of the run state machine.
///
/// `Defeated` and `Completed` are terminal; only a fresh `start_run`
/// leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Setup,
    Presenting,
    Defeated,
    Completed,
}

impl RunPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Defeated | Self::Completed)
    }
}

/// One resolved turn in the semester log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: u32,
    pub event_title: String,
    pub choice_text: String,
    pub response: String,
}

/// The mutable aggregate for one playthrough.
///
/// Owned exclusively by the engine session for the duration of a run;
/// the event catalog itself is shared immutable data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunState {
    #[serde(default)]
    pub stats: Stats,
    /// Accumulated narrative flags, insertion-ordered, no duplicates.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Shuffle order as indices into the catalog; fixed for the run.
    #[serde(default)]
    pub order: Vec<usize>,
    /// Position in `order` of the event currently presented.
    #[serde(default)]
    pub cursor: usize,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub phase: RunPhase,
}

impl RunState {
    /// Number of turns resolved so far.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Add a flag, preserving insertion order and set semantics.
    pub fn add_flag(&mut self, flag: &str) {
        if !self.has_flag(flag) {
            self.flags.push(flag.to_string());
        }
    }

    pub fn remove_flag(&mut self, flag: &str) {
        self.flags.retain(|f| f != flag);
    }
}
