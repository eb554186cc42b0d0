use serde::{Deserialize, Serialize};

use super::contribution::ContributionYear;
use super::user::{Profile, Repository};

pub const NO_DATA_LABEL: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    /// Bytes for a single repository, heuristic weight for account totals.
    pub value: f64,
    pub color: String,
    /// Rounded per entry; a sequence may not sum to exactly 100.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_commits: u64,
    pub top_languages: Vec<LanguageEntry>,
    pub busiest_month: String,
    pub busiest_day: String,
}

/// Everything the presentation layer needs for one account and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapResult {
    pub user: Profile,
    pub repos: Vec<Repository>,
    pub contributions: ContributionYear,
    pub languages: Vec<LanguageEntry>,
    pub stats: AggregateStats,
}
