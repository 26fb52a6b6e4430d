use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use ubc_survival_game::data::{Choice, Event, Stat};

/// Decision returned by a [`PlayerPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub choice_index: usize,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(choice_index: usize, rationale: Option<String>) -> Self {
        Self {
            choice_index,
            rationale,
        }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select an option for the presented event.
    fn pick_choice(&mut self, event: &Event) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Grinder,
    Hedonist,
    Gremlin,
    Balanced,
    Shuffler,
}

impl Strategy {
    pub const ALL: [Self; 5] = [
        Self::Grinder,
        Self::Hedonist,
        Self::Gremlin,
        Self::Balanced,
        Self::Shuffler,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grinder => "Grinder",
            Self::Hedonist => "Hedonist",
            Self::Gremlin => "Gremlin",
            Self::Balanced => "Balanced",
            Self::Shuffler => "Shuffler",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Self::Grinder => Box::new(GrinderPolicy),
            Self::Hedonist => Box::new(HedonistPolicy),
            Self::Gremlin => Box::new(GremlinPolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::Shuffler => Box::new(ShufflerPolicy::new(seed)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct GrinderPolicy;
struct HedonistPolicy;
struct GremlinPolicy;
struct BalancedPolicy;

struct ShufflerPolicy {
    rng: ChaCha20Rng,
}

impl ShufflerPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

fn stat_total(choice: &Choice, stat: Stat) -> i32 {
    choice
        .effects
        .iter()
        .filter(|e| e.stat == stat)
        .map(|e| e.amount)
        .sum()
}

fn pick_by(event: &Event, score: impl Fn(&Choice) -> i32) -> (usize, i32) {
    event
        .options
        .iter()
        .enumerate()
        .map(|(idx, choice)| (idx, score(choice)))
        .max_by_key(|&(_, score)| score)
        .unwrap_or((0, 0))
}

impl PlayerPolicy for GrinderPolicy {
    fn name(&self) -> &'static str {
        "Grinder"
    }

    fn pick_choice(&mut self, event: &Event) -> PolicyDecision {
        let (idx, score) = pick_by(event, |c| stat_total(c, Stat::Survival));
        PolicyDecision::new(idx, Some(format!("survival {score:+}")))
    }
}

impl PlayerPolicy for HedonistPolicy {
    fn name(&self) -> &'static str {
        "Hedonist"
    }

    fn pick_choice(&mut self, event: &Event) -> PolicyDecision {
        let (idx, score) = pick_by(event, |c| stat_total(c, Stat::Serotonin));
        PolicyDecision::new(idx, Some(format!("serotonin {score:+}")))
    }
}

impl PlayerPolicy for GremlinPolicy {
    fn name(&self) -> &'static str {
        "Gremlin"
    }

    fn pick_choice(&mut self, event: &Event) -> PolicyDecision {
        let (idx, score) = pick_by(event, |c| stat_total(c, Stat::Chaos));
        PolicyDecision::new(idx, Some(format!("chaos {score:+}")))
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn pick_choice(&mut self, event: &Event) -> PolicyDecision {
        // Survival keeps the run alive, so it counts double; runaway
        // chaos is treated as a liability.
        let (idx, score) = pick_by(event, |c| {
            2 * stat_total(c, Stat::Survival) + stat_total(c, Stat::Serotonin)
                - stat_total(c, Stat::Chaos).max(0)
        });
        PolicyDecision::new(idx, Some(format!("weighted {score:+}")))
    }
}

impl PlayerPolicy for ShufflerPolicy {
    fn name(&self) -> &'static str {
        "Shuffler"
    }

    fn pick_choice(&mut self, event: &Event) -> PolicyDecision {
        if event.options.is_empty() {
            return PolicyDecision::new(0, None);
        }
        let idx = self.rng.gen_range(0..event.options.len());
        PolicyDecision::new(idx, Some("random".to_string()))
    }
}
