//! Source trait definition

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;

/// Trait for listing the published versions of one artifact
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Short name used in logs (e.g. "github", "file")
    fn name(&self) -> &'static str;

    /// Fetch every published version as `raw version -> artifact URI`
    ///
    /// A version listed twice keeps its last location.
    async fn fetch(&self) -> Result<HashMap<String, String>, SourceError>;
}
