//! Hasher test utilities

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use depcheck::version::error::FetchError;
use depcheck::version::hasher::ArtifactHasher;

/// In-memory hasher returning fixed digests per URI
///
/// URIs without a digest fail with a 404 status error. Every requested URI
/// is recorded.
pub struct StaticHasher {
    digests: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticHasher {
    pub fn new() -> Self {
        Self {
            digests: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_digest(mut self, uri: &str, digest: &str) -> Self {
        self.digests.insert(uri.to_string(), digest.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactHasher for StaticHasher {
    async fn sha256(&self, uri: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(uri.to_string());

        self.digests
            .get(uri)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: uri.to_string(),
                status: 404,
            })
    }
}

/// Hasher that sleeps on every call and records the peak number of calls
/// in flight at once
#[derive(Default)]
pub struct CountingHasher {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl CountingHasher {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactHasher for CountingHasher {
    async fn sha256(&self, uri: &str) -> Result<String, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("sha-of-{}", uri))
    }
}

/// Build a `raw -> uri` mapping from pairs
pub fn entries(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(raw, uri)| (raw.to_string(), uri.to_string()))
        .collect()
}
