//! Strict normalizer
//!
//! Accepts tokens that already look like semver with optional metadata:
//! - `v1.2.3`, `1.2`, `8`
//! - `11.0.13+8`, `9.0.62-1`, `1.2.3.4`
//!
//! Anything after the numeric groups is kept as a suffix, with or without a
//! separator, so `8u312` reads as `8.0.0+u312`.

use regex::Regex;

use crate::version::error::ResolveError;
use crate::version::normalized::NormalizedVersion;
use crate::version::normalizer::{NormalizeStrategy, VersionNormalizer};
use crate::version::normalizers::assemble;

pub struct StrictNormalizer {
    /// `v?MAJOR[.MINOR[.PATCH]][SEP?REST]`
    pattern: Regex,
}

impl StrictNormalizer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^v?(?P<major>\d+)(?:\.(?P<minor>\d+))?(?:\.(?P<patch>\d+))?(?:(?P<sep>[^0-9A-Za-z])?(?P<rest>.+))?$",
            )
            .expect("strict version pattern is valid"),
        }
    }
}

impl Default for StrictNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionNormalizer for StrictNormalizer {
    fn strategy(&self) -> NormalizeStrategy {
        NormalizeStrategy::Strict
    }

    fn normalize(&self, raw: &str) -> Result<NormalizedVersion, ResolveError> {
        let caps = self
            .pattern
            .captures(raw.trim())
            .ok_or_else(|| ResolveError::MalformedVersion(raw.to_string()))?;

        assemble(raw, &caps)
    }
}
