//! GitHub Releases source
//!
//! Lists the releases of a repository and maps each release tag to the
//! download URL of the first asset whose name matches a pattern.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_GITHUB_API_URL, USER_AGENT};
use crate::source::traits::VersionSource;
use crate::version::error::SourceError;

/// Response from GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: String,
    browser_download_url: String,
}

pub struct GitHubReleaseSource {
    client: reqwest::Client,
    base_url: String,
    repository: String,
    asset_pattern: Regex,
}

impl GitHubReleaseSource {
    /// Creates a source for `owner/repo` against a custom API base URL
    pub fn new(base_url: &str, repository: &str, asset_pattern: Regex) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            asset_pattern,
        }
    }

    /// Creates a source against api.github.com
    pub fn for_repository(repository: &str, asset_pattern: Regex) -> Self {
        Self::new(DEFAULT_GITHUB_API_URL, repository, asset_pattern)
    }
}

#[async_trait::async_trait]
impl VersionSource for GitHubReleaseSource {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self) -> Result<HashMap<String, String>, SourceError> {
        let url = format!(
            "{}/repos/{}/releases?per_page=100",
            self.base_url, self.repository
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(self.repository.clone()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(SourceError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let releases: Vec<Release> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        let mut entries = HashMap::new();
        for release in releases.into_iter().filter(|r| !r.draft) {
            match release
                .assets
                .iter()
                .find(|a| self.asset_pattern.is_match(&a.name))
            {
                Some(asset) => {
                    entries.insert(release.tag_name, asset.browser_download_url.clone());
                }
                None => debug!("Release {} has no matching asset", release.tag_name),
            }
        }

        Ok(entries)
    }
}
