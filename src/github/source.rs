use async_trait::async_trait;

use crate::error::Result;
use crate::models::{LanguageEntry, Profile, Repository};

/// The GitHub-backed data the wrap pipeline needs.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    async fn fetch_profile(&self, login: &str) -> Result<Profile>;

    /// Up to 100 repositories, most recently pushed first, forks included.
    async fn fetch_repositories(&self, login: &str) -> Result<Vec<Repository>>;

    /// Language breakdown of one repository, ranked by bytes, with
    /// percentages of that repository's own total.
    async fn fetch_repository_languages(
        &self,
        login: &str,
        repo: &str,
    ) -> Result<Vec<LanguageEntry>>;
}
