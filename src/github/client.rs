use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::analysis::languages::rank_language_bytes;
use crate::error::{Error, Result};
use crate::github::classifier::classify_response;
use crate::github::retry::RetryPolicy;
use crate::github::source::GitHubSource;
use crate::models::{LanguageEntry, Profile, Repository};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to the GitHub proxy. Every call goes through the retry policy.
pub struct GitHubClient {
    client: Client,
    retry: RetryPolicy,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>, retry: RetryPolicy) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitwrap/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            retry,
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        read_json(response, true).await
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn fetch_profile(&self, login: &str) -> Result<Profile> {
        let url = endpoint(&self.base_url, &["user", login])?;
        tracing::info!("Fetching profile: {}", login);
        let url = &url;
        self.retry
            .run(&format!("fetch profile for {}", login), move || self.get(url))
            .await
    }

    async fn fetch_repositories(&self, login: &str) -> Result<Vec<Repository>> {
        let mut url = endpoint(&self.base_url, &["user", login, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "pushed")
            .append_pair("per_page", "100")
            .append_pair("type", "all");
        tracing::info!("Fetching repositories for: {}", login);
        let url = &url;
        self.retry
            .run(&format!("fetch repos for {}", login), move || self.get(url))
            .await
    }

    async fn fetch_repository_languages(
        &self,
        login: &str,
        repo: &str,
    ) -> Result<Vec<LanguageEntry>> {
        let url = endpoint(&self.base_url, &["repos", login, repo, "languages"])?;
        tracing::debug!("Fetching languages for: {}/{}", login, repo);
        let url = &url;
        let bytes: BTreeMap<String, u64> = self
            .retry
            .run(&format!("fetch languages for {}/{}", login, repo), move || {
                self.get(url)
            })
            .await?;
        Ok(rank_language_bytes(bytes))
    }
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url)
        .map_err(|e| Error::Config(format!("invalid base URL {}: {}", base_url, e)))
}

/// Appends `segments` to the base path, percent-encoding each one so a
/// `/` or `?` inside an identifier stays part of that segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Decodes a successful body, or classifies the failure. With
/// `rate_headers` off, rate-limit headers are not consulted.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    rate_headers: bool,
) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let headers = if rate_headers {
        response.headers().clone()
    } else {
        header::HeaderMap::new()
    };
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

    Err(classify_response(status, &headers, message))
}
