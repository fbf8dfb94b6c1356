/*!
 * Tests for model resolution: pattern construction, catalog search and
 * failure modes
 */

use srtai::errors::ResolveError;
use srtai::model_resolver::{ModelResolver, find_best_match, search_patterns};
use srtai::providers::ModelSession;
use srtai::providers::mock::MockProvider;

fn patterns_en_pt() -> Vec<String> {
    search_patterns("en", "pt")
}

/// Test the exact pattern order, most specific first
#[test]
fn test_search_patterns_withLocaleQualifiedCodes_shouldOrderMostSpecificFirst() {
    let patterns = search_patterns("en_GB", "pt_BR");

    assert_eq!(
        patterns,
        vec![
            "opus-mt-en_GB-pt_BR",
            "opus-mt-en-pt",
            "opus-mt-tc-big-en_GB-pt_BR",
            "opus-mt-tc-big-en-pt",
            "opus-mt-tc-en_GB-pt_BR",
            "opus-mt-tc-en-pt",
        ]
    );
}

/// Test that an exact match is preferred over a near-miss appearing earlier
/// in catalog order (the en-pt vs en-por scenario)
#[test]
fn test_find_best_match_withNearMissFirstInCatalog_shouldPreferExactPattern() {
    let models = vec![
        "Helsinki-NLP/opus-mt-en-por".to_string(),
        "Helsinki-NLP/opus-mt-en-pt".to_string(),
    ];

    let best = find_best_match(&models, &patterns_en_pt());
    assert_eq!(best, Some("Helsinki-NLP/opus-mt-en-pt"));
}

/// Test fallback to the tc-big family when the plain family is absent
#[test]
fn test_find_best_match_withOnlyTcBigModel_shouldFallBackToIt() {
    let models = vec!["Helsinki-NLP/opus-mt-tc-big-en-pt".to_string()];

    let best = find_best_match(&models, &patterns_en_pt());
    assert_eq!(best, Some("Helsinki-NLP/opus-mt-tc-big-en-pt"));
}

/// Test truncation: a locale-qualified pair falls back to two-letter codes
#[test]
fn test_find_best_match_withTruncatedCodes_shouldMatchShortModel() {
    let models = vec!["Helsinki-NLP/opus-mt-en-pt".to_string()];
    let patterns = search_patterns("en_GB", "pt_BR");

    assert_eq!(
        find_best_match(&models, &patterns),
        Some("Helsinki-NLP/opus-mt-en-pt")
    );
}

/// Test the deterministic lexicographic tie-break within one pattern
#[test]
fn test_find_best_match_withTwoEntriesForSamePattern_shouldPickLexicographicallySmallest() {
    let models = vec![
        "Helsinki-NLP/variant-b-opus-mt-en-pt".to_string(),
        "Helsinki-NLP/variant-a-opus-mt-en-pt".to_string(),
    ];

    assert_eq!(
        find_best_match(&models, &patterns_en_pt()),
        Some("Helsinki-NLP/variant-a-opus-mt-en-pt")
    );
}

/// Test no match at all
#[test]
fn test_find_best_match_withNoMatchingEntry_shouldReturnNone() {
    let models = vec!["Helsinki-NLP/opus-mt-fr-de".to_string()];
    assert_eq!(find_best_match(&models, &patterns_en_pt()), None);
}

/// Test that resolution without a match fails with ModelNotFound and never
/// attempts to load a session
#[tokio::test]
async fn test_resolve_withNoMatchingModel_shouldFailWithoutLoading() {
    let provider = MockProvider::with_catalog(vec!["Helsinki-NLP/opus-mt-fr-de"]);
    let load_counter = provider.load_counter();
    let resolver = ModelResolver::new(Box::new(provider));

    let err = resolver.resolve("en", "pt").await.unwrap_err();

    match err {
        ResolveError::ModelNotFound { src, tgt } => {
            assert_eq!(src, "en");
            assert_eq!(tgt, "pt");
        }
        other => panic!("expected ModelNotFound, got {:?}", other),
    }
    assert_eq!(load_counter.load(std::sync::atomic::Ordering::SeqCst), 0);
}

/// Test that an unreachable catalog surfaces as a load error
#[tokio::test]
async fn test_resolve_withUnreachableCatalog_shouldFailWithModelLoad() {
    let resolver = ModelResolver::new(Box::new(MockProvider::unreachable_catalog()));

    let err = resolver.resolve("en", "pt").await.unwrap_err();
    assert!(matches!(err, ResolveError::ModelLoad { .. }));
}

/// Test that a session-construction failure surfaces as ModelLoad carrying
/// the model that matched
#[tokio::test]
async fn test_resolve_withFailingSessionLoad_shouldFailWithModelLoadForMatchedModel() {
    let provider =
        MockProvider::with_catalog(vec!["Helsinki-NLP/opus-mt-en-pt"]).with_failing_loads();
    let load_counter = provider.load_counter();
    let resolver = ModelResolver::new(Box::new(provider));

    let err = resolver.resolve("en", "pt").await.unwrap_err();

    match err {
        ResolveError::ModelLoad { model, .. } => {
            assert_eq!(model, "Helsinki-NLP/opus-mt-en-pt");
        }
        other => panic!("expected ModelLoad, got {:?}", other),
    }
    assert_eq!(load_counter.load(std::sync::atomic::Ordering::SeqCst), 1);
}

/// Test successful resolution hands back a session for the matched model
#[tokio::test]
async fn test_resolve_withMatchingModel_shouldLoadSession() {
    let provider = MockProvider::with_catalog(vec![
        "Helsinki-NLP/opus-mt-en-de",
        "Helsinki-NLP/opus-mt-en-pt",
    ]);
    let resolver = ModelResolver::new(Box::new(provider));

    let session = resolver.resolve("en", "pt").await.unwrap();
    assert_eq!(session.model_id(), "Helsinki-NLP/opus-mt-en-pt");
}
