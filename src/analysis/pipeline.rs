use std::sync::Arc;

use futures::future::join_all;

use crate::analysis::languages::LanguageAggregator;
use crate::analysis::temporal::busiest_periods;
use crate::config::PipelineConfig;
use crate::contributions::{ContributionSource, YearSelector};
use crate::error::Result;
use crate::github::GitHubSource;
use crate::models::{AggregateStats, Repository, WrapResult};

/// Fetches everything for one account and derives the wrap.
///
/// Each call owns its data; nothing is shared between concurrent wraps.
pub struct WrapPipeline {
    github: Arc<dyn GitHubSource>,
    contributions: Arc<dyn ContributionSource>,
    languages: LanguageAggregator,
    config: PipelineConfig,
}

impl WrapPipeline {
    pub fn new(
        github: impl GitHubSource + 'static,
        contributions: impl ContributionSource + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self {
            github: Arc::new(github),
            contributions: Arc::new(contributions),
            languages: LanguageAggregator::new(),
            config,
        }
    }

    /// Wrap for the configured target year.
    pub async fn fetch_wrap(&self, login: &str) -> Result<WrapResult> {
        self.fetch_wrap_for(login, YearSelector::Year(self.config.target_year))
            .await
    }

    pub async fn fetch_wrap_for(&self, login: &str, year: YearSelector) -> Result<WrapResult> {
        // Step 1: profile, repositories and calendar side by side; first failure wins
        tracing::info!("Building wrap for {} ({})", login, year);
        let (user, repos, contributions) = tokio::try_join!(
            self.github.fetch_profile(login),
            self.github.fetch_repositories(login),
            self.contributions.fetch_contributions(login, year),
        )
        .map_err(|e| e.into_classified(&format!("fetch data for {}", login)))?;

        // Step 2: owned repositories by stars; forks only feed the language fallback
        let (mut owned, forks): (Vec<_>, Vec<_>) = repos.into_iter().partition(|r| !r.fork);
        owned.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        tracing::info!(
            "Found {} repositories ({} forks set aside)",
            owned.len(),
            forks.len()
        );

        // Step 3: precise language data for the top of the list
        let repos = self.enrich_top_repositories(login, owned).await;

        // Step 4: aggregate
        let weighting: Vec<Repository> = repos.iter().chain(forks.iter()).cloned().collect();
        let languages = self.languages.aggregate(&weighting);
        let periods = busiest_periods(&contributions.contributions);

        let stats = AggregateStats {
            total_commits: contributions.total,
            top_languages: languages
                .iter()
                .take(self.config.top_languages)
                .cloned()
                .collect(),
            busiest_month: periods.month,
            busiest_day: periods.weekday,
        };

        Ok(WrapResult {
            user,
            repos,
            contributions,
            languages,
            stats,
        })
    }

    /// Returns `[enriched top N] ++ [the rest, order kept]`. A failed
    /// language fetch leaves that repository with its primary label only.
    async fn enrich_top_repositories(
        &self,
        login: &str,
        mut ranked: Vec<Repository>,
    ) -> Vec<Repository> {
        let rest = ranked.split_off(self.config.enrich_top_n.min(ranked.len()));

        let enriched = join_all(ranked.into_iter().map(move |repo| async move {
            let fetched = self.github.fetch_repository_languages(login, &repo.name).await;
            match fetched {
                Ok(languages) => Repository {
                    languages: Some(languages),
                    ..repo
                },
                Err(e) => {
                    tracing::warn!("Language breakdown unavailable for {}: {}", repo.full_name, e);
                    repo
                }
            }
        }))
        .await;

        enriched.into_iter().chain(rest).collect()
    }
}
