use anyhow::{Result, bail};
use ubc_survival_game::seed::{WORD_LIST, decode_to_seed, generate_code_from_entropy};

/// Seed metadata resolved from CLI input.
#[derive(Debug, Clone)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, code: None }
    }

    #[must_use]
    pub const fn from_code(seed: u64, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
        }
    }

    /// Label used in reports: the semester code when one was given.
    #[must_use]
    pub fn label(&self) -> String {
        self.code
            .clone()
            .unwrap_or_else(|| self.seed.to_string())
    }
}

/// Resolve a list of CLI seed tokens into canonical seed metadata.
///
/// Supports literal integers, `SEM-WORD##` semester codes, and the
/// keyword `all`, which expands to one code per word-list entry.
///
/// # Errors
///
/// Fails on any unrecognized token.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut pending: Vec<SeedInfo> = Vec::new();
    let mut request_all = false;

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("all") {
            request_all = true;
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            pending.push(SeedInfo::from_numeric(value));
            continue;
        }

        if let Some(seed) = decode_to_seed(token) {
            pending.push(SeedInfo::from_code(seed, token.to_uppercase()));
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    if request_all {
        pending.extend(generate_all_code_seeds());
    }

    dedup_by_seed(&mut pending);
    Ok(pending)
}

fn generate_all_code_seeds() -> Vec<SeedInfo> {
    (0..WORD_LIST.len() as u64)
        .filter_map(|wi| {
            let entropy = wi | ((wi * 37 % 100) << 17);
            let code = generate_code_from_entropy(entropy);
            let seed = decode_to_seed(&code)?;
            Some(SeedInfo::from_code(seed, code))
        })
        .collect()
}

fn dedup_by_seed(seeds: &mut Vec<SeedInfo>) {
    let mut seen = std::collections::HashSet::new();
    seeds.retain(|info| seen.insert(info.seed));
}
