//! UBC Survival Game Engine
//!
//! Platform-agnostic core logic for the UBC Survival choice game: a
//! deterministic turn engine that presents events from a shuffled,
//! condition-gated pool, applies choice effects to a bounded stat
//! vector, and classifies the run's ending. This crate provides all
//! game mechanics without UI or platform-specific dependencies.

pub mod catalog;
pub mod constants;
pub mod data;
pub mod eligibility;
pub mod ending;
pub mod engine;
pub mod profile;
pub mod seed;
pub mod state;

// Re-export commonly used types
pub use catalog::{builtin_events, builtin_profiles};
pub use data::{
    CatalogError, Choice, Condition, Effect, EffectList, Event, EventCatalog, Stat, StatGate,
};
pub use eligibility::is_eligible;
pub use ending::{Ending, RunOutcome, RunSummary, classify};
pub use engine::{EngineError, GameSession, SetupError, TurnOutcome};
pub use profile::{ModifierEntry, ProfileCatalog, SetupChoices, StatMods};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use state::{HistoryEntry, RunPhase, RunState, Stats};
