//! Latest version resolution
//!
//! Turns a `raw version -> location` mapping into a single resolved output:
//!
//! 1. keep raw keys matching the version pattern
//! 2. normalize them (malformed entries fail the call unless skipping is enabled)
//! 3. drop prereleases when they are excluded
//! 4. order ascending by `major.minor.patch`, ties broken by the raw string
//! 5. drop versions below the since-version
//! 6. take the last candidate, look up its location and hash it
//!
//! Steps 1-5 are pure and exposed as [`select_candidates`] and
//! [`select_winner`]; [`VersionResolver`] adds the hashing and output
//! assembly.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::version::criteria::{OnMalformedEntry, SelectionCriteria};
use crate::version::enrich::Enricher;
use crate::version::error::ResolveError;
use crate::version::hasher::ArtifactHasher;
use crate::version::normalized::NormalizedVersion;
use crate::version::normalizer::VersionNormalizer;
use crate::version::output::ResolvedOutput;

/// A chosen version together with the location it was listed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub version: NormalizedVersion,
    pub location: String,
}

/// Filter, normalize and order the entries.
///
/// Returns every remaining candidate in ascending order, never empty.
pub fn select_candidates(
    entries: &HashMap<String, String>,
    criteria: &SelectionCriteria,
    normalizer: &dyn VersionNormalizer,
) -> Result<Vec<NormalizedVersion>, ResolveError> {
    let mut candidates = Vec::with_capacity(entries.len());

    for raw in entries.keys().filter(|raw| criteria.matches_pattern(raw)) {
        match normalizer.normalize(raw) {
            Ok(version) => candidates.push(version),
            Err(e) => match criteria.on_malformed_entry {
                OnMalformedEntry::Fail => return Err(e),
                OnMalformedEntry::SkipWithWarning => {
                    warn!("Skipping unparseable version {:?}: {}", raw, e);
                }
            },
        }
    }

    if !criteria.include_prerelease {
        candidates.retain(|v| !v.is_prerelease());
    }

    candidates.sort_by(|a, b| {
        a.cmp_precedence(b)
            .then_with(|| a.original().cmp(b.original()))
    });

    if let Some(since) = &criteria.since_version {
        candidates.retain(|v| v.cmp_precedence(since).is_ge());
    }

    if candidates.is_empty() {
        return Err(ResolveError::NoCandidateVersion);
    }

    debug!(
        "{} of {} entries remain after filtering",
        candidates.len(),
        entries.len()
    );

    Ok(candidates)
}

/// Pick the latest candidate and the location it was listed under
pub fn select_winner(
    entries: &HashMap<String, String>,
    criteria: &SelectionCriteria,
    normalizer: &dyn VersionNormalizer,
) -> Result<Selection, ResolveError> {
    let winner = select_candidates(entries, criteria, normalizer)?
        .pop()
        .ok_or(ResolveError::NoCandidateVersion)?;

    locate(entries, winner)
}

/// Pair a normalized version with its entry's location
fn locate(
    entries: &HashMap<String, String>,
    version: NormalizedVersion,
) -> Result<Selection, ResolveError> {
    let location = entries.get(version.original()).cloned().ok_or_else(|| {
        ResolveError::InternalInconsistency(format!(
            "no location for selected version {:?}",
            version.original()
        ))
    })?;

    Ok(Selection { version, location })
}

/// Resolves versions into hashed outputs
///
/// Holds the hasher collaborator and the enrichers applied to every output.
/// It keeps no per-call state, so a single instance can serve concurrent
/// resolutions.
pub struct VersionResolver {
    hasher: Arc<dyn ArtifactHasher>,
    enrichers: Vec<Box<dyn Enricher>>,
}

impl VersionResolver {
    pub fn new(hasher: Arc<dyn ArtifactHasher>) -> Self {
        Self {
            hasher,
            enrichers: Vec::new(),
        }
    }

    /// Add an enricher; enrichers run in insertion order after `extra` is merged
    pub fn with_enricher(mut self, enricher: impl Enricher + 'static) -> Self {
        self.enrichers.push(Box::new(enricher));
        self
    }

    /// Resolve the single latest version
    pub async fn select_latest(
        &self,
        entries: &HashMap<String, String>,
        criteria: &SelectionCriteria,
        normalizer: &dyn VersionNormalizer,
        extra: &BTreeMap<String, String>,
    ) -> Result<ResolvedOutput, ResolveError> {
        let selection = select_winner(entries, criteria, normalizer)?;
        self.resolve(selection, extra).await
    }

    /// Resolve every version remaining after filtering, in ascending order.
    ///
    /// Used by batch callers that release everything since a given version.
    /// Artifacts are hashed one at a time in ascending order and the first
    /// failure stops the call.
    pub async fn resolve_since(
        &self,
        entries: &HashMap<String, String>,
        criteria: &SelectionCriteria,
        normalizer: &dyn VersionNormalizer,
        extra: &BTreeMap<String, String>,
    ) -> Result<Vec<ResolvedOutput>, ResolveError> {
        let selections = select_candidates(entries, criteria, normalizer)?
            .into_iter()
            .map(|version| locate(entries, version))
            .collect::<Result<Vec<_>, _>>()?;

        let mut outputs = Vec::with_capacity(selections.len());
        for selection in selections {
            outputs.push(self.resolve(selection, extra).await?);
        }

        Ok(outputs)
    }

    async fn resolve(
        &self,
        selection: Selection,
        extra: &BTreeMap<String, String>,
    ) -> Result<ResolvedOutput, ResolveError> {
        let Selection { version, location } = selection;

        let sha256 = self.hasher.sha256(&location).await?;

        let mut output = ResolvedOutput::new(version.core(), location, sha256);
        output.merge_extra(extra.clone())?;

        for enricher in &self.enrichers {
            let fields = enricher.enrich(&output, &version);
            output.merge_extra(fields)?;
        }

        debug!("Resolved {} to {}", version.original(), output.uri);

        Ok(output)
    }
}
