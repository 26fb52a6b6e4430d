//! Event eligibility evaluation.
//!
//! Pure, total, and side-effect free: conditions are checked against the
//! run state as it stands at query time, never at catalog-load time.

use crate::data::{Condition, Event};
use crate::state::Stats;

/// Check whether `event` may be presented given the current stats and
/// flag set. Events without conditions are always eligible; present
/// sub-conditions must all hold simultaneously.
#[must_use]
pub fn is_eligible(event: &Event, stats: &Stats, flags: &[String]) -> bool {
    event
        .conditions
        .as_ref()
        .is_none_or(|cond| condition_met(cond, stats, flags))
}

fn condition_met(cond: &Condition, stats: &Stats, flags: &[String]) -> bool {
    if let Some(flag) = &cond.flag
        && !has_flag(flags, flag)
    {
        return false;
    }
    if let Some(flag) = &cond.not_flag
        && has_flag(flags, flag)
    {
        return false;
    }
    if let Some(gate) = &cond.min_stat
        && stats.get(gate.stat) < gate.value
    {
        return false;
    }
    if let Some(gate) = &cond.max_stat
        && stats.get(gate.stat) > gate.value
    {
        return false;
    }
    true
}

fn has_flag(flags: &[String], flag: &str) -> bool {
    flags.iter().any(|f| f == flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Stat, StatGate};

    fn gated_event(conditions: Option<Condition>) -> Event {
        Event {
            id: "gated".to_string(),
            title: "Gated".to_string(),
            description: String::new(),
            weight: 1,
            conditions,
            options: Vec::new(),
        }
    }

    fn flags(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn unconditional_event_is_always_eligible() {
        let event = gated_event(None);
        assert!(is_eligible(&event, &Stats::new(0, 0, 0), &[]));
    }

    #[test]
    fn flag_condition_requires_presence() {
        let event = gated_event(Some(Condition {
            flag: Some("knitter".to_string()),
            ..Condition::default()
        }));
        let stats = Stats::default();
        assert!(!is_eligible(&event, &stats, &[]));
        assert!(is_eligible(&event, &stats, &flags(&["knitter"])));
    }

    #[test]
    fn not_flag_condition_requires_absence() {
        let event = gated_event(Some(Condition {
            not_flag: Some("boring".to_string()),
            ..Condition::default()
        }));
        let stats = Stats::default();
        assert!(is_eligible(&event, &stats, &[]));
        assert!(!is_eligible(&event, &stats, &flags(&["boring"])));
    }

    #[test]
    fn stat_gates_are_inclusive_thresholds() {
        let event = gated_event(Some(Condition {
            min_stat: Some(StatGate {
                stat: Stat::Chaos,
                value: 80,
            }),
            ..Condition::default()
        }));
        assert!(!is_eligible(&event, &Stats::new(50, 50, 79), &[]));
        assert!(is_eligible(&event, &Stats::new(50, 50, 80), &[]));

        let event = gated_event(Some(Condition {
            max_stat: Some(StatGate {
                stat: Stat::Survival,
                value: 20,
            }),
            ..Condition::default()
        }));
        assert!(is_eligible(&event, &Stats::new(20, 50, 0), &[]));
        assert!(!is_eligible(&event, &Stats::new(21, 50, 0), &[]));
    }

    #[test]
    fn all_sub_conditions_must_hold() {
        let event = gated_event(Some(Condition {
            flag: Some("popular".to_string()),
            min_stat: Some(StatGate {
                stat: Stat::Serotonin,
                value: 30,
            }),
            ..Condition::default()
        }));
        let popular = flags(&["popular"]);
        assert!(!is_eligible(&event, &Stats::new(50, 29, 0), &popular));
        assert!(!is_eligible(&event, &Stats::new(50, 30, 0), &[]));
        assert!(is_eligible(&event, &Stats::new(50, 30, 0), &popular));
    }
}
