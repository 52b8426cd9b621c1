use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Malformed version: {0:?}")]
    MalformedVersion(String),

    #[error("No candidate version matched the selection criteria")]
    NoCandidateVersion,

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("Failed to fetch artifact: {0}")]
    ArtifactFetchError(#[from] FetchError),

    #[error("Output key {0:?} is reserved and cannot be supplied as an extra field")]
    ReservedOutputKey(String),

    #[error("Invalid version pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
