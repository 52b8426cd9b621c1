//! Version resolution layer
//!
//! This module normalizes heterogeneous vendor version tokens into comparable
//! semantic versions and selects the latest one according to caller filters.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│  Resolver   │────▶│    Sink     │
//! │ raw -> uri  │     │  (select)   │     │ (key=value) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                       │         │
//!                       ▼         ▼
//!               ┌─────────────┐ ┌─────────────┐
//!               │ Normalizers │ │   Hasher    │
//!               │(strict,ext.)│ │  (sha256)   │
//!               └─────────────┘ └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`normalized`]: `NormalizedVersion` and its precedence ordering
//! - [`normalizer`]: Normalizer trait and strategy selection
//! - [`normalizers`]: Strict and extended normalizer implementations
//! - [`criteria`]: Selection criteria (pattern, since-version, prerelease)
//! - [`resolver`]: Candidate selection and output assembly
//! - [`output`]: `ResolvedOutput` with reserved-key protection
//! - [`enrich`]: Post-resolution enrichers (Java 8 CPE, PURL)
//! - [`hasher`]: Hasher trait for artifact checksums
//! - [`hashers`]: HTTP hasher implementation
//! - [`error`]: Error types for resolution, fetching and sources

pub mod criteria;
pub mod enrich;
pub mod error;
pub mod hasher;
pub mod hashers;
pub mod normalized;
pub mod normalizer;
pub mod normalizers;
pub mod output;
pub mod resolver;
