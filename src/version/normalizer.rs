//! Version normalization abstraction

use std::str::FromStr;

use serde::Deserialize;

use crate::version::error::ResolveError;
use crate::version::normalized::NormalizedVersion;
use crate::version::normalizers::{ExtendedNormalizer, StrictNormalizer};

/// Trait for turning a raw vendor version token into a [`NormalizedVersion`]
///
/// Implementations must be pure: the same input always yields the same
/// output. Inputs that do not look like a version fail with
/// [`ResolveError::MalformedVersion`].
pub trait VersionNormalizer: Send + Sync {
    /// Returns the strategy this normalizer implements
    fn strategy(&self) -> NormalizeStrategy;

    fn normalize(&self, raw: &str) -> Result<NormalizedVersion, ResolveError>;
}

/// Which normalizer a caller expects its raw tokens to need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NormalizeStrategy {
    /// Clean semver-like tokens (`v1.2.3`, `11.0.13+8`, `9.0.62-1`)
    #[default]
    Strict,
    /// Messy vendor tokens (`8u312`, `11.0.2_9`, `jdk-17.0.1`)
    Extended,
}

impl NormalizeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeStrategy::Strict => "strict",
            NormalizeStrategy::Extended => "extended",
        }
    }

    /// Create the normalizer implementing this strategy
    pub fn normalizer(&self) -> Box<dyn VersionNormalizer> {
        match self {
            NormalizeStrategy::Strict => Box::new(StrictNormalizer::new()),
            NormalizeStrategy::Extended => Box::new(ExtendedNormalizer::new()),
        }
    }
}

impl FromStr for NormalizeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(NormalizeStrategy::Strict),
            "extended" | "metadata" => Ok(NormalizeStrategy::Extended),
            _ => Err(format!(
                "unknown normalizer '{}', expected 'strict' or 'extended'",
                s
            )),
        }
    }
}

/// Normalize a single raw token with the given strategy
pub fn normalize(raw: &str, strategy: NormalizeStrategy) -> Result<NormalizedVersion, ResolveError> {
    strategy.normalizer().normalize(raw)
}
