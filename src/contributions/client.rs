use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde_json::Value;

use crate::contributions::normalize::normalize_calendar;
use crate::contributions::source::{ContributionSource, YearSelector};
use crate::error::Result;
use crate::github::client::{endpoint, parse_base_url, read_json};
use crate::github::RetryPolicy;
use crate::models::ContributionYear;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the public contribution-calendar service.
///
/// The service sends no GitHub-style rate-limit headers, so a 403/429 from
/// it is retried on the plain backoff schedule.
pub struct ContributionClient {
    client: Client,
    retry: RetryPolicy,
    base_url: Url,
}

impl ContributionClient {
    pub fn new(base_url: &str, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent("gitwrap/0.1")
            .default_headers(header::HeaderMap::from_iter([(
                header::ACCEPT,
                header::HeaderValue::from_static("application/json"),
            )]))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            retry,
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn get_calendar(&self, url: &Url) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        read_json(response, false).await
    }
}

#[async_trait]
impl ContributionSource for ContributionClient {
    async fn fetch_contributions(
        &self,
        login: &str,
        year: YearSelector,
    ) -> Result<ContributionYear> {
        let mut url = endpoint(&self.base_url, &[login])?;
        url.query_pairs_mut().append_pair("y", &year.to_string());
        tracing::info!("Fetching contributions for: {} ({})", login, year);

        let url = &url;
        let payload = self
            .retry
            .run(&format!("fetch contributions for {}", login), move || {
                self.get_calendar(url)
            })
            .await?;

        Ok(normalize_calendar(&payload, year))
    }
}
