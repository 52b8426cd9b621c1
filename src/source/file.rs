//! File source
//!
//! Reads a JSON object mapping raw versions to artifact URIs, as produced by
//! an upstream scraping step:
//!
//! ```json
//! { "11.0.13+8": "https://example.com/jdk-11.0.13.tgz" }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::info;

use crate::source::traits::VersionSource;
use crate::version::error::SourceError;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl VersionSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<HashMap<String, String>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)?;

        info!("Read {} versions from {:?}", entries.len(), self.path);

        Ok(entries)
    }
}
