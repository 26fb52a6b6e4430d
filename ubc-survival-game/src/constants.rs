//! Centralized balance and tuning constants for UBC Survival game logic.
//!
//! Keeping these together ensures gameplay can only be adjusted via code
//! changes reviewed in version control, rather than through external
//! assets.

// Stat bounds --------------------------------------------------------------
pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;

// Starting baseline before faculty/year/vibe modifiers ---------------------
pub const BASELINE_SURVIVAL: i32 = 50;
pub const BASELINE_SEROTONIN: i32 = 50;
pub const BASELINE_CHAOS: i32 = 10;

// Run pacing ---------------------------------------------------------------
/// A run resolves at most this many events before the semester ends.
pub const TURN_CAP: usize = 20;

/// Selection weight assumed when an event does not declare one.
pub const DEFAULT_EVENT_WEIGHT: u32 = 1;

// Narrative flags consulted by the ending classifier -----------------------
pub const FLAG_PARTY_ANIMAL: &str = "party_animal";
pub const FLAG_RACCOON_FRIEND: &str = "raccoon_friend";
