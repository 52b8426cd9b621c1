//! Selection criteria applied by the resolver

use regex::Regex;
use serde::Deserialize;

use crate::version::error::ResolveError;
use crate::version::normalized::NormalizedVersion;

/// What to do when an eligible raw token cannot be normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnMalformedEntry {
    /// Abort the whole resolution with `MalformedVersion`
    #[default]
    Fail,
    /// Drop the entry and log a warning. Meant for long tag histories where
    /// old, irregularly named tags are expected.
    SkipWithWarning,
}

/// Filters deciding which raw entries are eligible to win
#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    /// Raw keys must match this pattern to be eligible
    pub version_pattern: Option<Regex>,
    /// Versions lower than this are excluded
    pub since_version: Option<NormalizedVersion>,
    pub include_prerelease: bool,
    pub on_malformed_entry: OnMalformedEntry,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            version_pattern: None,
            since_version: None,
            include_prerelease: true,
            on_malformed_entry: OnMalformedEntry::Fail,
        }
    }
}

impl SelectionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version_pattern(mut self, pattern: &str) -> Result<Self, ResolveError> {
        self.version_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn since(mut self, version: NormalizedVersion) -> Self {
        self.since_version = Some(version);
        self
    }

    pub fn exclude_prerelease(mut self) -> Self {
        self.include_prerelease = false;
        self
    }

    pub fn skip_malformed(mut self) -> Self {
        self.on_malformed_entry = OnMalformedEntry::SkipWithWarning;
        self
    }

    /// Whether a raw key passes the version pattern
    pub fn matches_pattern(&self, raw: &str) -> bool {
        self.version_pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_includes_prerelease_and_fails_on_malformed() {
        let criteria = SelectionCriteria::default();

        assert!(criteria.include_prerelease);
        assert_eq!(criteria.on_malformed_entry, OnMalformedEntry::Fail);
        assert!(criteria.matches_pattern("anything"));
    }

    #[test]
    fn version_pattern_filters_raw_keys() {
        let criteria = SelectionCriteria::new().version_pattern(r"^8\.").unwrap();

        assert!(criteria.matches_pattern("8.0.312"));
        assert!(!criteria.matches_pattern("11.0.2"));
    }

    #[test]
    fn version_pattern_rejects_invalid_regex() {
        let result = SelectionCriteria::new().version_pattern("(");

        assert!(matches!(result, Err(ResolveError::InvalidPattern(_))));
    }

    #[test]
    fn on_malformed_entry_deserializes_from_camel_case() {
        let policy: OnMalformedEntry = serde_json::from_str(r#""skipWithWarning""#).unwrap();
        assert_eq!(policy, OnMalformedEntry::SkipWithWarning);
    }
}
