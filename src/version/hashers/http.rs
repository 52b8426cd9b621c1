//! HTTP artifact hasher

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::USER_AGENT;
use crate::version::error::FetchError;
use crate::version::hasher::ArtifactHasher;

/// Downloads an artifact and digests it as the body streams in
pub struct HttpHasher {
    client: reqwest::Client,
}

impl HttpHasher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpHasher {
    fn default() -> Self {
        Self::new(
            reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
        )
    }
}

#[async_trait::async_trait]
impl ArtifactHasher for HttpHasher {
    async fn sha256(&self, uri: &str) -> Result<String, FetchError> {
        debug!("Hashing artifact {}", uri);

        let response = self.client.get(uri).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: uri.to_string(),
                status: status.as_u16(),
            });
        }

        let mut hasher = Sha256::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            hasher.update(&chunk?);
        }

        Ok(hex::encode(hasher.finalize()))
    }
}
