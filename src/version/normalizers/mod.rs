//! Strategy-specific version normalizers
//!
//! Both normalizers share [`assemble`], which turns the four captured pieces
//! `(major)(minor)?(patch)?(rest)?` into a [`NormalizedVersion`]. They only
//! differ in how permissive the pattern feeding it is.

mod extended;
mod strict;

pub use extended::ExtendedNormalizer;
pub use strict::StrictNormalizer;

use regex::Captures;

use crate::version::error::ResolveError;
use crate::version::normalized::NormalizedVersion;

/// Suffix words that mark a final release rather than a prerelease
const RELEASE_MARKERS: &[&str] = &["ga", "final", "release"];

/// Suffix words that mark a prerelease after any separator, with an
/// optional trailing number (`ea`, `rc1`, `M2`)
const PRERELEASE_MARKERS: &[&str] = &[
    "ea", "alpha", "beta", "rc", "cr", "m", "milestone", "preview", "snapshot",
];

/// Numeric groups, separator and rest captured from a raw token
struct Parts<'a> {
    major: &'a str,
    minor: Option<&'a str>,
    patch: Option<&'a str>,
    separator: Option<char>,
    rest: Option<&'a str>,
}

impl<'a> Parts<'a> {
    /// Read the named groups `major`, `minor`, `patch`, `sep` and `rest`
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            major: caps.name("major")?.as_str(),
            minor: caps.name("minor").map(|m| m.as_str()),
            patch: caps.name("patch").map(|m| m.as_str()),
            separator: caps.name("sep").and_then(|m| m.as_str().chars().next()),
            rest: caps.name("rest").map(|m| m.as_str()),
        })
    }
}

/// Build a normalized version from captures, defaulting missing groups to 0
fn assemble(raw: &str, caps: &Captures<'_>) -> Result<NormalizedVersion, ResolveError> {
    let malformed = || ResolveError::MalformedVersion(raw.to_string());
    let parts = Parts::from_captures(caps).ok_or_else(malformed)?;

    let parse = |group: Option<&str>| -> Result<u64, ResolveError> {
        group.unwrap_or("0").parse::<u64>().map_err(|_| malformed())
    };

    let major = parse(Some(parts.major))?;
    let minor = parse(parts.minor)?;
    let patch = parse(parts.patch)?;

    let prerelease = parts.rest.is_some_and(|rest| match parts.separator {
        Some('-') => is_prerelease_suffix(rest),
        Some('_' | '.') => starts_with_prerelease_marker(rest),
        _ => false,
    });

    Ok(NormalizedVersion::from_parts(
        raw, major, minor, patch, parts.rest, prerelease,
    ))
}

/// A dash suffix is a prerelease when it starts with a letter and is not a
/// release marker like `GA` or `Final` or a Java build number like `b07`.
/// Numeric suffixes (`9.0.62-1`) are vendor revisions.
fn is_prerelease_suffix(rest: &str) -> bool {
    let starts_alphabetic = rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_alphabetic {
        return false;
    }

    let first_word = first_word(rest);

    let is_build_number = first_word
        .strip_prefix('b')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));

    !is_build_number
        && !RELEASE_MARKERS
            .iter()
            .any(|marker| first_word.eq_ignore_ascii_case(marker))
}

/// Suffixes after `_` or `.` only count when they name a known prerelease
/// stage, since vendors also put tags like `jdk-11.0.13-ga` there.
fn starts_with_prerelease_marker(rest: &str) -> bool {
    let stage = first_word(rest).trim_end_matches(|c: char| c.is_ascii_digit());

    !stage.is_empty()
        && PRERELEASE_MARKERS
            .iter()
            .any(|marker| stage.eq_ignore_ascii_case(marker))
}

fn first_word(rest: &str) -> &str {
    rest.split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .unwrap_or(rest)
}
