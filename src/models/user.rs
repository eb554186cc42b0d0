use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wrap::LanguageEntry;

/// Account snapshot as returned by `GET /user/{login}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    pub html_url: String,
    pub description: Option<String>,
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub languages_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub homepage: Option<String>,
    /// Size in kilobytes.
    #[serde(default)]
    pub size: u64,
    /// Detailed breakdown, only present for enriched repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageEntry>>,
}

impl Repository {
    pub fn has_language_breakdown(&self) -> bool {
        self.languages.as_ref().is_some_and(|l| !l.is_empty())
    }
}
