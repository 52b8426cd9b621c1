//! Normalized version model shared by every normalizer and the resolver

use std::cmp::Ordering;
use std::fmt;

use semver::{BuildMetadata, Version};

/// A vendor version token decomposed into comparable components.
///
/// The suffix that follows the three numeric components is kept as semver
/// build metadata, so it shows up in the string form but never takes part in
/// [`NormalizedVersion::cmp_precedence`]. The raw token is retained because
/// callers need it to look the winning entry back up in the source mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedVersion {
    version: Version,
    prerelease: Option<String>,
    original: String,
}

impl NormalizedVersion {
    /// Build a normalized version from already-extracted components.
    ///
    /// `suffix` is sanitized into valid build metadata; when `prerelease` is
    /// set the sanitized suffix is also reported as the prerelease marker.
    pub fn from_parts(
        original: &str,
        major: u64,
        minor: u64,
        patch: u64,
        suffix: Option<&str>,
        prerelease: bool,
    ) -> Self {
        let mut version = Version::new(major, minor, patch);
        let build = suffix.and_then(sanitize_build_metadata);

        if let Some(build) = &build {
            version.build = build.clone();
        }

        let prerelease = if prerelease {
            build.map(|b| b.as_str().to_string())
        } else {
            None
        };

        Self {
            version,
            prerelease,
            original: original.to_string(),
        }
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// Prerelease marker (e.g. `rc1`), if the suffix was classified as one
    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Build metadata, i.e. everything after the three numeric components
    pub fn build_metadata(&self) -> Option<&str> {
        if self.version.build.is_empty() {
            None
        } else {
            Some(self.version.build.as_str())
        }
    }

    /// The raw vendor token this version was normalized from
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The underlying semver value, build metadata included
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Zero-padded `major.minor.patch` without prerelease or build metadata
    pub fn core(&self) -> String {
        format!(
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        )
    }

    /// Compare by major, minor and patch only.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.version.cmp_precedence(&other.version)
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Rewrite an arbitrary vendor suffix into valid semver build metadata.
///
/// Characters outside `[0-9A-Za-z-]` become `-` and empty dot-separated
/// identifiers are dropped. Returns `None` when nothing is left.
fn sanitize_build_metadata(suffix: &str) -> Option<BuildMetadata> {
    let sanitized = suffix
        .split('.')
        .filter(|ident| !ident.is_empty())
        .map(|ident| {
            ident
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".");

    if sanitized.is_empty() {
        return None;
    }

    BuildMetadata::new(&sanitized).ok()
}
