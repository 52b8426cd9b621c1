use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::version::criteria::{OnMalformedEntry, SelectionCriteria};
use crate::version::error::ResolveError;
use crate::version::normalizer::NormalizeStrategy;

/// Default base URL for the GitHub API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// User-Agent sent with every HTTP request
pub const USER_AGENT: &str = concat!("depcheck/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DEPCHECK_LOG";

/// Environment variable naming the CI step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Checker configuration, usually loaded from a JSON file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    pub version_pattern: Option<String>,
    pub since_version: Option<String>,
    pub include_prerelease: bool,
    pub on_malformed_entry: OnMalformedEntry,
    pub normalizer: NormalizeStrategy,
    /// Add the Java 8 `cpe` update field
    pub java8_cpe: bool,
    pub purl: Option<PurlConfig>,
    pub extra: BTreeMap<String, String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            version_pattern: None,
            since_version: None,
            include_prerelease: true,
            on_malformed_entry: OnMalformedEntry::Fail,
            normalizer: NormalizeStrategy::Strict,
            java8_cpe: false,
            purl: None,
            extra: BTreeMap::new(),
        }
    }
}

/// PURL extraction from the winning URI
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PurlConfig {
    pub pattern: String,
    pub template: String,
}

impl CheckerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Build selection criteria, compiling the pattern and normalizing the
    /// since-version with the configured strategy
    pub fn selection_criteria(&self) -> Result<SelectionCriteria, ResolveError> {
        let mut criteria = SelectionCriteria {
            include_prerelease: self.include_prerelease,
            on_malformed_entry: self.on_malformed_entry,
            ..SelectionCriteria::default()
        };

        if let Some(pattern) = &self.version_pattern {
            criteria = criteria.version_pattern(pattern)?;
        }

        if let Some(since) = &self.since_version {
            criteria = criteria.since(self.normalizer.normalizer().normalize(since)?);
        }

        Ok(criteria)
    }
}
