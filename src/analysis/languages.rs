use crate::models::{LanguageEntry, Repository};
use crate::taxonomy::language_color;

/// Weight factor applied to every repository in the fallback pass.
pub const FORK_WEIGHT: f64 = 0.3;

/// `1 + log10(stars + 1)`: starred repositories count more, but not linearly.
pub fn popularity_multiplier(stars: u32) -> f64 {
    1.0 + (f64::from(stars) + 1.0).log10()
}

/// Ranks a single repository's byte counts against their own total.
pub fn rank_language_bytes<I>(bytes: I) -> Vec<LanguageEntry>
where
    I: IntoIterator<Item = (String, u64)>,
{
    let mut weights = LanguageWeights::default();
    for (name, count) in bytes {
        weights.add(&name, count as f64);
    }
    weights.rank()
}

/// Per-language running totals, kept in first-seen order so equal weights
/// rank the way they were encountered.
#[derive(Debug, Default)]
struct LanguageWeights {
    entries: Vec<(String, f64)>,
}

impl LanguageWeights {
    fn add(&mut self, language: &str, weight: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == language) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((language.to_string(), weight)),
        }
    }

    fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    fn rank(mut self) -> Vec<LanguageEntry> {
        let total = self.total();
        self.entries
            .sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        self.entries
            .into_iter()
            .map(|(name, value)| LanguageEntry {
                color: language_color(&name).to_string(),
                percentage: if total > 0.0 {
                    (value / total * 100.0).round() as u32
                } else {
                    0
                },
                name,
                value,
            })
            .collect()
    }
}

/// Builds the account-wide language mix from the enriched repositories.
pub struct LanguageAggregator {
    fork_weight: f64,
}

impl LanguageAggregator {
    pub fn new() -> Self {
        Self {
            fork_weight: FORK_WEIGHT,
        }
    }

    pub fn aggregate(&self, repos: &[Repository]) -> Vec<LanguageEntry> {
        let mut weights = LanguageWeights::default();

        for repo in repos.iter().filter(|r| !r.fork) {
            let multiplier = popularity_multiplier(repo.stargazers_count);
            Self::accumulate(&mut weights, repo, multiplier);
        }

        // Nothing owned carries a language: let forks speak, at reduced weight.
        if weights.total() == 0.0 {
            for repo in repos {
                Self::accumulate(&mut weights, repo, self.fork_weight);
            }
        }

        weights.rank()
    }

    fn accumulate(weights: &mut LanguageWeights, repo: &Repository, factor: f64) {
        if repo.has_language_breakdown() {
            for entry in repo.languages.iter().flatten() {
                weights.add(&entry.name, entry.value * factor);
            }
        } else if let Some(primary) = &repo.language {
            weights.add(primary, repo.size as f64 * factor);
        }
    }
}

impl Default for LanguageAggregator {
    fn default() -> Self {
        Self::new()
    }
}
