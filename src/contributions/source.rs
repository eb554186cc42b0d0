use std::fmt;

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use crate::error::Result;
use crate::models::ContributionYear;

/// Which stretch of the calendar to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSelector {
    Year(i32),
    /// The rolling twelve months up to today.
    Last,
}

impl YearSelector {
    /// Key of the `total` object in the calendar response.
    pub fn total_key(&self) -> String {
        match self {
            YearSelector::Year(year) => year.to_string(),
            YearSelector::Last => "lastYear".to_string(),
        }
    }

    /// Year reported on the normalized result.
    pub fn resolved_year(&self) -> i32 {
        match self {
            YearSelector::Year(year) => *year,
            YearSelector::Last => Utc::now().year(),
        }
    }
}

impl fmt::Display for YearSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearSelector::Year(year) => write!(f, "{}", year),
            YearSelector::Last => f.write_str("last"),
        }
    }
}

#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch_contributions(&self, login: &str, year: YearSelector)
        -> Result<ContributionYear>;
}
