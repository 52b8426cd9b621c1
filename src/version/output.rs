//! Resolved output tuple handed to output sinks

use std::collections::BTreeMap;

use serde::Serialize;

use crate::version::error::ResolveError;

/// Keys owned by the resolver that extra fields may never replace
pub const RESERVED_KEYS: [&str; 3] = ["version", "uri", "sha256"];

/// The single winning version with its location, checksum and extra fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOutput {
    /// Zero-padded `major.minor.patch`
    pub version: String,
    pub uri: String,
    pub sha256: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ResolvedOutput {
    pub fn new(
        version: impl Into<String>,
        uri: impl Into<String>,
        sha256: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            uri: uri.into(),
            sha256: sha256.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Merge additional fields into `extra`.
    ///
    /// Fails without merging anything if any key is reserved. Existing extra
    /// keys are replaced by later values.
    pub fn merge_extra<I>(&mut self, fields: I) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let fields: Vec<(String, String)> = fields.into_iter().collect();

        if let Some((key, _)) = fields
            .iter()
            .find(|(key, _)| RESERVED_KEYS.contains(&key.as_str()))
        {
            return Err(ResolveError::ReservedOutputKey(key.clone()));
        }

        self.extra.extend(fields);
        Ok(())
    }

    /// All fields as key-value pairs, reserved keys first, extras sorted
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let reserved = [
            ("version", self.version.as_str()),
            ("uri", self.uri.as_str()),
            ("sha256", self.sha256.as_str()),
        ];

        reserved
            .into_iter()
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }
}
