use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::constants::DEFAULT_EVENT_WEIGHT;

/// One of the three bounded resources a run tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Survival,
    Serotonin,
    Chaos,
}

impl Stat {
    pub const ALL: [Self; 3] = [Self::Survival, Self::Serotonin, Self::Chaos];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Serotonin => "serotonin",
            Self::Chaos => "chaos",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "survival" => Ok(Self::Survival),
            "serotonin" => Ok(Self::Serotonin),
            "chaos" => Ok(Self::Chaos),
            _ => Err(()),
        }
    }
}

/// A single signed stat delta applied when a choice is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub stat: Stat,
    pub amount: i32,
}

/// Effect lists are short (one to three entries); keep them inline.
pub type EffectList = SmallVec<[Effect; 3]>;

/// A selectable option within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub effects: EffectList,
    #[serde(default)]
    pub add_flags: Vec<String>,
    #[serde(default)]
    pub remove_flags: Vec<String>,
    pub response: String,
}

/// Stat threshold used by eligibility conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGate {
    pub stat: Stat,
    pub value: i32,
}

/// Conjunction of requirements gating when an event may appear.
///
/// Absent sub-conditions always pass; present ones must all hold against
/// the run state at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Condition {
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub not_flag: Option<String>,
    #[serde(default)]
    pub min_stat: Option<StatGate>,
    #[serde(default)]
    pub max_stat: Option<StatGate>,
}

/// An entry in the event catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Selection weight carried for schema fidelity; the engine shuffles
    /// uniformly and does not sample by weight.
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub conditions: Option<Condition>,
    #[serde(default)]
    pub options: Vec<Choice>,
}

const fn default_weight() -> u32 {
    DEFAULT_EVENT_WEIGHT
}

/// Container for the full, immutable event pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventCatalog {
    pub events: Vec<Event>,
}

impl EventCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub const fn empty() -> Self {
        Self { events: Vec::new() }
    }

    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid event data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a catalog from pre-parsed events
    #[must_use]
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check structural invariants the engine relies on.
    ///
    /// Malformed entries in the embedded catalog are a build-time defect;
    /// this is how the test suite surfaces them.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` encountered.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for event in &self.events {
            if !seen.insert(event.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: event.id.clone(),
                });
            }
            if !(2..=3).contains(&event.options.len()) {
                return Err(CatalogError::OptionCount {
                    id: event.id.clone(),
                    count: event.options.len(),
                });
            }
            if event.weight == 0 {
                return Err(CatalogError::ZeroWeight {
                    id: event.id.clone(),
                });
            }
            for choice in &event.options {
                for flag in &choice.add_flags {
                    if choice.remove_flags.contains(flag) {
                        return Err(CatalogError::FlagConflict {
                            id: event.id.clone(),
                            option: choice.text.clone(),
                            flag: flag.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Errors raised when catalog data violates schema invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate event id `{id}`")]
    DuplicateId { id: String },
    #[error("event `{id}` has {count} options (expected 2 to 3)")]
    OptionCount { id: String, count: usize },
    #[error("event `{id}` declares a zero selection weight")]
    ZeroWeight { id: String },
    #[error("event `{id}` option `{option}` both adds and removes flag `{flag}`")]
    FlagConflict {
        id: String,
        option: String,
        flag: String,
    },
}
