//! Hasher trait for computing the checksum of a resolved artifact

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;

/// Trait for computing the SHA-256 digest of the content behind a URI
///
/// Timeouts and retries belong to the implementation; the resolver calls
/// this exactly once per resolved version.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ArtifactHasher: Send + Sync {
    /// Returns the lowercase hex SHA-256 of the artifact at `uri`
    async fn sha256(&self, uri: &str) -> Result<String, FetchError>;
}
