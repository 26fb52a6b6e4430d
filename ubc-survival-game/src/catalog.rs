//! Embedded static game data.
//!
//! The event pool and the setup selection tables ship inside the crate as
//! JSON assets, parsed once per process. Malformed embedded data is a
//! build-time defect surfaced by `tests/data_shapes.rs`, so the accessors
//! fall back to empty catalogs rather than panicking.

use std::sync::OnceLock;

use crate::data::EventCatalog;
use crate::profile::ProfileCatalog;

const DEFAULT_EVENTS_DATA: &str = include_str!("../assets/events.json");
const DEFAULT_PROFILES_DATA: &str = include_str!("../assets/profiles.json");

/// Borrow the process-wide built-in event catalog.
#[must_use]
pub fn builtin_events() -> &'static EventCatalog {
    static CATALOG: OnceLock<EventCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| EventCatalog::from_json(DEFAULT_EVENTS_DATA).unwrap_or_default())
}

/// Borrow the process-wide built-in selection tables.
#[must_use]
pub fn builtin_profiles() -> &'static ProfileCatalog {
    static CATALOG: OnceLock<ProfileCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| ProfileCatalog::from_json(DEFAULT_PROFILES_DATA).unwrap_or_default())
}
