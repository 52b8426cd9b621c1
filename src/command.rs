//! Check pipeline: fetch from a source, resolve, emit to a sink

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::CheckerConfig;
use crate::sink::OutputSink;
use crate::source::VersionSource;
use crate::version::criteria::SelectionCriteria;
use crate::version::enrich::{Java8Cpe, PurlFromUri};
use crate::version::error::ResolveError;
use crate::version::hasher::ArtifactHasher;
use crate::version::normalizer::NormalizeStrategy;
use crate::version::resolver::VersionResolver;

/// Whether to emit only the latest version or every remaining one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    #[default]
    Latest,
    /// Every version left after filtering, ascending
    All,
}

/// Everything a single check needs besides its collaborators
pub struct CheckPlan {
    pub criteria: SelectionCriteria,
    pub strategy: NormalizeStrategy,
    pub extra: BTreeMap<String, String>,
    pub mode: ResolveMode,
}

impl CheckPlan {
    pub fn from_config(config: &CheckerConfig, mode: ResolveMode) -> Result<Self, ResolveError> {
        Ok(Self {
            criteria: config.selection_criteria()?,
            strategy: config.normalizer,
            extra: config.extra.clone(),
            mode,
        })
    }
}

/// Build a resolver with the enrichers the config asks for
pub fn build_resolver(
    config: &CheckerConfig,
    hasher: Arc<dyn ArtifactHasher>,
) -> Result<VersionResolver, ResolveError> {
    let mut resolver = VersionResolver::new(hasher);

    if config.java8_cpe {
        resolver = resolver.with_enricher(Java8Cpe);
    }

    if let Some(purl) = &config.purl {
        resolver = resolver.with_enricher(PurlFromUri::new(&purl.pattern, purl.template.clone())?);
    }

    Ok(resolver)
}

/// Run one check and return how many outputs were emitted
pub async fn run_check(
    source: &dyn VersionSource,
    resolver: &VersionResolver,
    plan: &CheckPlan,
    sink: &mut dyn OutputSink,
) -> anyhow::Result<usize> {
    let entries = source
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch versions from {} source", source.name()))?;

    info!("Fetched {} versions from {}", entries.len(), source.name());

    let normalizer = plan.strategy.normalizer();

    match plan.mode {
        ResolveMode::Latest => {
            let output = resolver
                .select_latest(&entries, &plan.criteria, normalizer.as_ref(), &plan.extra)
                .await?;
            info!("Latest version is {} ({})", output.version, output.uri);
            sink.emit(&output)?;
            Ok(1)
        }
        ResolveMode::All => {
            let outputs = resolver
                .resolve_since(&entries, &plan.criteria, normalizer.as_ref(), &plan.extra)
                .await?;
            info!("Resolved {} versions", outputs.len());
            sink.emit_all(&outputs)?;
            Ok(outputs.len())
        }
    }
}
