//! Post-resolution enrichment
//!
//! Enrichers derive additional output fields (CPE, PURL, fixed metadata)
//! from the resolved output and the winning version. The resolver applies
//! them without knowing any vendor policy.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::normalized::NormalizedVersion;
use crate::version::output::ResolvedOutput;

/// Trait for deriving extra output fields after a winner has been chosen
pub trait Enricher: Send + Sync {
    fn enrich(&self, output: &ResolvedOutput, winner: &NormalizedVersion)
    -> BTreeMap<String, String>;
}

/// Java 8 CPE update field
///
/// Java 8 releases are named `1.8.0_NNN`/`8uNNN`, where NNN is the update
/// number carried in the patch component. When the winner's major version is
/// 8 this adds `cpe = "update" + patch`.
pub struct Java8Cpe;

impl Enricher for Java8Cpe {
    fn enrich(
        &self,
        _output: &ResolvedOutput,
        winner: &NormalizedVersion,
    ) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        if winner.major() == 8 {
            fields.insert("cpe".to_string(), format!("update{}", winner.patch()));
        }
        fields
    }
}

/// Extracts a PURL from the winning URI with a secondary regex
///
/// The template is expanded with the pattern's capture groups
/// (`$1`, `${name}`). A URI that does not match adds nothing.
pub struct PurlFromUri {
    pattern: Regex,
    template: String,
}

impl PurlFromUri {
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self, ResolveError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            template: template.into(),
        })
    }
}

impl Enricher for PurlFromUri {
    fn enrich(
        &self,
        output: &ResolvedOutput,
        _winner: &NormalizedVersion,
    ) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        match self.pattern.captures(&output.uri) {
            Some(caps) => {
                let mut purl = String::new();
                caps.expand(&self.template, &mut purl);
                fields.insert("purl".to_string(), purl);
            }
            None => debug!("PURL pattern did not match uri {}", output.uri),
        }

        fields
    }
}

/// Adds the same fixed fields to every output
pub struct StaticFields(pub BTreeMap<String, String>);

impl Enricher for StaticFields {
    fn enrich(
        &self,
        _output: &ResolvedOutput,
        _winner: &NormalizedVersion,
    ) -> BTreeMap<String, String> {
        self.0.clone()
    }
}
