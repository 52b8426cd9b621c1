//! Extended (metadata) normalizer
//!
//! Accepts everything the strict normalizer does, plus irregular vendor
//! tokens:
//! - vendor prefixes: `jdk-17.0.1`, `jdk8u312-b07`, `dragonwell-11.0.13_jdk-11.0.13-ga`
//! - underscore separators: `11.0.2_9`, `1.8.0_345-b01`
//! - Java update numbers: `8u312` reads as `8.0.312`

use regex::Regex;

use crate::version::error::ResolveError;
use crate::version::normalized::NormalizedVersion;
use crate::version::normalizer::{NormalizeStrategy, VersionNormalizer};
use crate::version::normalizers::assemble;

pub struct ExtendedNormalizer {
    /// `PREFIX? MAJOR u UPDATE [SEP?REST]`
    update_pattern: Regex,
    /// `PREFIX? v?MAJOR[.MINOR[.PATCH]][SEP?REST]`
    pattern: Regex,
}

impl ExtendedNormalizer {
    pub fn new() -> Self {
        Self {
            update_pattern: Regex::new(
                r"^(?:[A-Za-z][A-Za-z0-9]*[-_]|[A-Za-z]+)*(?P<major>\d+)u(?P<patch>\d+)(?:(?P<sep>[^0-9A-Za-z])?(?P<rest>.+))?$",
            )
            .expect("update version pattern is valid"),
            pattern: Regex::new(
                r"^(?:[A-Za-z][A-Za-z0-9]*[-_]|[A-Za-z]+)*v?(?P<major>\d+)(?:\.(?P<minor>\d+))?(?:\.(?P<patch>\d+))?(?:(?P<sep>[^0-9A-Za-z])?(?P<rest>.+))?$",
            )
            .expect("extended version pattern is valid"),
        }
    }
}

impl Default for ExtendedNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionNormalizer for ExtendedNormalizer {
    fn strategy(&self) -> NormalizeStrategy {
        NormalizeStrategy::Extended
    }

    fn normalize(&self, raw: &str) -> Result<NormalizedVersion, ResolveError> {
        let trimmed = raw.trim();

        let caps = self
            .update_pattern
            .captures(trimmed)
            .or_else(|| self.pattern.captures(trimmed))
            .ok_or_else(|| ResolveError::MalformedVersion(raw.to_string()))?;

        assemble(raw, &caps)
    }
}
