//! End-to-end resolution tests using the public API and an in-memory hasher

mod helper;

use std::collections::BTreeMap;
use std::sync::Arc;

use rstest::rstest;

use helper::{CountingHasher, StaticHasher, entries};
use depcheck::version::criteria::SelectionCriteria;
use depcheck::version::enrich::{Java8Cpe, PurlFromUri};
use depcheck::version::error::{FetchError, ResolveError};
use depcheck::version::normalizer::{NormalizeStrategy, normalize};
use depcheck::version::normalizers::{ExtendedNormalizer, StrictNormalizer};
use depcheck::version::output::ResolvedOutput;
use depcheck::version::resolver::{VersionResolver, select_candidates, select_winner};

#[tokio::test]
async fn resolves_latest_jdk_without_filters() {
    let entries = entries(&[
        ("11.0.13+8", "https://x/a.tgz"),
        ("11.0.12+7", "https://x/b.tgz"),
        ("17.0.1+12", "https://x/c.tgz"),
    ]);
    let hasher = Arc::new(StaticHasher::new().with_digest("https://x/c.tgz", "c0ffee"));

    let output = VersionResolver::new(hasher.clone())
        .select_latest(
            &entries,
            &SelectionCriteria::default(),
            &StrictNormalizer::new(),
            &BTreeMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(output, ResolvedOutput::new("17.0.1", "https://x/c.tgz", "c0ffee"));
    assert_eq!(hasher.requested(), vec!["https://x/c.tgz".to_string()]);
}

#[tokio::test]
async fn resolves_java8_with_cpe_and_purl() {
    let entries = entries(&[
        ("8.0.302", "https://x/jdk8u302-b08.tar.gz"),
        ("8.0.312", "https://x/jdk8u312-b07.tar.gz"),
        ("11.0.13", "https://x/jdk-11.0.13.tar.gz"),
    ]);
    let hasher = Arc::new(StaticHasher::new().with_digest("https://x/jdk8u312-b07.tar.gz", "88"));
    let criteria = SelectionCriteria::new().version_pattern(r"^8\.").unwrap();
    let extra = BTreeMap::from([("source".to_string(), "https://x".to_string())]);

    let output = VersionResolver::new(hasher)
        .with_enricher(Java8Cpe)
        .with_enricher(
            PurlFromUri::new(r"/jdk8u(\d+)-(b\d+)\.tar\.gz$", "pkg:generic/jdk@8u$1-$2").unwrap(),
        )
        .select_latest(&entries, &criteria, &StrictNormalizer::new(), &extra)
        .await
        .unwrap();

    assert_eq!(output.version, "8.0.312");
    assert_eq!(output.sha256, "88");
    assert_eq!(
        output.extra,
        BTreeMap::from([
            ("cpe".to_string(), "update312".to_string()),
            ("purl".to_string(), "pkg:generic/jdk@8u312-b07".to_string()),
            ("source".to_string(), "https://x".to_string()),
        ])
    );
}

#[tokio::test]
async fn reports_hasher_failure_as_artifact_fetch_error() {
    let entries = entries(&[("1.0.0", "https://x/gone.tgz")]);

    let result = VersionResolver::new(Arc::new(StaticHasher::new()))
        .select_latest(
            &entries,
            &SelectionCriteria::default(),
            &StrictNormalizer::new(),
            &BTreeMap::new(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ResolveError::ArtifactFetchError(FetchError::Status { status: 404, .. }))
    ));
}

#[tokio::test]
async fn resolve_since_hashes_every_retained_version() {
    let entries = entries(&[
        ("1.0.0", "https://x/1.0.0"),
        ("1.1.0", "https://x/1.1.0"),
        ("2.0.0", "https://x/2.0.0"),
    ]);
    let hasher = Arc::new(
        StaticHasher::new()
            .with_digest("https://x/1.1.0", "11")
            .with_digest("https://x/2.0.0", "20"),
    );
    let criteria = SelectionCriteria::new().since(normalize("1.1.0", NormalizeStrategy::Strict).unwrap());

    let outputs = VersionResolver::new(hasher.clone())
        .resolve_since(&entries, &criteria, &StrictNormalizer::new(), &BTreeMap::new())
        .await
        .unwrap();

    assert_eq!(
        outputs.iter().map(|o| o.version.as_str()).collect::<Vec<_>>(),
        vec!["1.1.0", "2.0.0"]
    );
    let mut requested = hasher.requested();
    requested.sort();
    assert_eq!(requested, vec!["https://x/1.1.0", "https://x/2.0.0"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn resolve_since_hashes_one_artifact_at_a_time() {
    let raws = (0..40).map(|patch| format!("1.0.{}", patch)).collect::<Vec<_>>();
    let pairs = raws
        .iter()
        .map(|raw| (raw.as_str(), raw.as_str()))
        .collect::<Vec<_>>();
    let entries = entries(&pairs);
    let hasher = Arc::new(CountingHasher::default());

    let outputs = VersionResolver::new(hasher.clone())
        .resolve_since(
            &entries,
            &SelectionCriteria::default(),
            &StrictNormalizer::new(),
            &BTreeMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(outputs.len(), 40);
    assert_eq!(outputs[39].version, "1.0.39");
    assert_eq!(hasher.peak(), 1);
}

#[rstest]
#[case("11.0.2_9", (11, 0, 2))]
#[case("1.8.0_345-b01", (1, 8, 0))]
#[case("1.2.3 beta", (1, 2, 3))]
#[case("8u312", (8, 0, 0))]
fn strict_normalizer_keeps_numeric_groups_before_any_suffix(
    #[case] raw: &str,
    #[case] expected: (u64, u64, u64),
) {
    let version = normalize(raw, NormalizeStrategy::Strict).unwrap();

    assert_eq!((version.major(), version.minor(), version.patch()), expected);
}

#[test]
fn pattern_is_applied_to_raw_keys_not_numeric_order() {
    let entries = entries(&[("8.0.312", "urlA"), ("11.0.2", "urlB")]);
    let criteria = SelectionCriteria::new().version_pattern(r"^8\.").unwrap();

    let winner = select_winner(&entries, &criteria, &StrictNormalizer::new()).unwrap();

    assert_eq!(winner.version.original(), "8.0.312");
    assert_eq!(winner.location, "urlA");
}

#[test]
fn prerelease_is_excluded_when_requested() {
    let entries = entries(&[("1.2.3", "A"), ("1.2.4-rc1", "B")]);
    let criteria = SelectionCriteria::new().exclude_prerelease();

    let winner = select_winner(&entries, &criteria, &StrictNormalizer::new()).unwrap();

    assert_eq!(winner.version.core(), "1.2.3");
    assert_eq!(winner.location, "A");
}

#[test]
fn since_version_keeps_ascending_remainder() {
    let entries = entries(&[("1.0.0", "a"), ("1.1.0", "b"), ("2.0.0", "c")]);
    let criteria = SelectionCriteria::new().since(normalize("1.1.0", NormalizeStrategy::Strict).unwrap());

    let candidates = select_candidates(&entries, &criteria, &StrictNormalizer::new()).unwrap();

    assert_eq!(
        candidates.iter().map(|v| v.core()).collect::<Vec<_>>(),
        vec!["1.1.0", "2.0.0"]
    );
}

#[test]
fn no_candidate_when_pattern_matches_nothing() {
    let entries = entries(&[("1.0.0", "A")]);
    let criteria = SelectionCriteria::new().version_pattern(r"^9\.").unwrap();

    let result = select_winner(&entries, &criteria, &StrictNormalizer::new());

    assert!(matches!(result, Err(ResolveError::NoCandidateVersion)));
}

#[test]
fn extended_normalizer_handles_vendor_tag_history() {
    let entries = entries(&[
        ("jdk8u302-b08", "https://x/302"),
        ("jdk8u312-b07", "https://x/312"),
        ("jdk8u292-b10", "https://x/292"),
        ("nightly-build", "https://x/nightly"),
    ]);
    let criteria = SelectionCriteria::new().skip_malformed();

    let winner = select_winner(&entries, &criteria, &ExtendedNormalizer::new()).unwrap();

    assert_eq!(winner.version.core(), "8.0.312");
    assert_eq!(winner.location, "https://x/312");
}

#[rstest]
#[case("8", "8.0.0")]
#[case("8.5", "8.5.0")]
#[case("v1.2.3", "1.2.3")]
#[case("11.0.13+8", "11.0.13")]
fn normalize_zero_pads_missing_components(#[case] raw: &str, #[case] expected: &str) {
    let version = normalize(raw, NormalizeStrategy::Strict).unwrap();

    assert_eq!(version.core(), expected);
}

#[rstest]
#[case(NormalizeStrategy::Strict)]
#[case(NormalizeStrategy::Extended)]
fn normalize_rejects_non_version(#[case] strategy: NormalizeStrategy) {
    let result = normalize("not-a-version", strategy);

    assert!(matches!(result, Err(ResolveError::MalformedVersion(raw)) if raw == "not-a-version"));
}

#[test]
fn build_metadata_is_preserved_but_ignored_for_ordering() {
    let abc = normalize("1.2.3+abc", NormalizeStrategy::Strict).unwrap();
    let xyz = normalize("1.2.3+xyz", NormalizeStrategy::Strict).unwrap();

    assert!(abc.cmp_precedence(&xyz).is_eq());
    assert_eq!(abc.build_metadata(), Some("abc"));
    assert_eq!(xyz.build_metadata(), Some("xyz"));
}
