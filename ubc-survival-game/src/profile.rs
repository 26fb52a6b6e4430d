use serde::{Deserialize, Serialize};

use crate::state::Stats;

/// Additive stat deltas contributed by one setup selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatMods {
    #[serde(default)]
    pub survival: i32,
    #[serde(default)]
    pub serotonin: i32,
    #[serde(default)]
    pub chaos: i32,
}

impl StatMods {
    /// Add these deltas onto `stats` without clamping; the caller clamps
    /// once after the full composition.
    pub fn apply(&self, stats: &mut Stats) {
        stats.survival += self.survival;
        stats.serotonin += self.serotonin;
        stats.chaos += self.chaos;
    }
}

/// A named entry in one of the three selection tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierEntry {
    pub name: String,
    #[serde(default)]
    pub mods: StatMods,
}

/// The player's three setup selections, by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SetupChoices {
    pub faculty: String,
    pub year: String,
    pub vibe: String,
}

impl SetupChoices {
    #[must_use]
    pub fn new(faculty: &str, year: &str, vibe: &str) -> Self {
        Self {
            faculty: faculty.to_string(),
            year: year.to_string(),
            vibe: vibe.to_string(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.faculty.is_empty() && !self.year.is_empty() && !self.vibe.is_empty()
    }
}

/// The three ordered selection tables shown at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileCatalog {
    #[serde(default)]
    pub faculties: Vec<ModifierEntry>,
    #[serde(default)]
    pub years: Vec<ModifierEntry>,
    #[serde(default)]
    pub vibes: Vec<ModifierEntry>,
}

impl ProfileCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            faculties: Vec::new(),
            years: Vec::new(),
            vibes: Vec::new(),
        }
    }

    /// Load the selection tables from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid tables.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn faculty(&self, name: &str) -> Option<&ModifierEntry> {
        find(&self.faculties, name)
    }

    #[must_use]
    pub fn year(&self, name: &str) -> Option<&ModifierEntry> {
        find(&self.years, name)
    }

    #[must_use]
    pub fn vibe(&self, name: &str) -> Option<&ModifierEntry> {
        find(&self.vibes, name)
    }

    /// Compose the starting stats for a set of selections: baseline plus
    /// each table's deltas, clamped once after composition. Unknown
    /// selection names contribute no delta.
    #[must_use]
    pub fn starting_stats(&self, choices: &SetupChoices) -> Stats {
        let mut stats = Stats::default();
        let picks = [
            self.faculty(&choices.faculty),
            self.year(&choices.year),
            self.vibe(&choices.vibe),
        ];
        for entry in picks.into_iter().flatten() {
            entry.mods.apply(&mut stats);
        }
        stats.clamp();
        stats
    }
}

fn find<'a>(entries: &'a [ModifierEntry], name: &str) -> Option<&'a ModifierEntry> {
    entries.iter().find(|e| e.name == name)
}
