/*!
 * End-to-end tests for the translation pipeline: resolve, translate, write
 */

use std::path::PathBuf;

use srtai::app_controller::Controller;
use srtai::errors::{AppError, ResolveError};
use srtai::model_resolver::ModelResolver;
use srtai::providers::mock::{MockBehavior, MockProvider};
use srtai::subtitle_processor::SubtitleCollection;
use tempfile::tempdir;

use crate::common;

fn controller_with(provider: MockProvider, output_dir: PathBuf) -> Controller {
    Controller::with_output_dir(ModelResolver::new(Box::new(provider)), output_dir)
}

/// The reference scenario: three cues reversed, order and timestamps
/// unchanged, written as translated_<basename>
#[tokio::test]
async fn test_run_withReversingModel_shouldTranslateAllCuesInPlace() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "movie.srt", &common::sample_srt());

    let controller = controller_with(
        MockProvider::with_catalog(common::default_catalog()),
        dir.path().to_path_buf(),
    );

    let output = controller
        .run(&input, "en", "pt", |_, _| {})
        .await
        .unwrap();

    assert_eq!(output, dir.path().join("translated_movie.srt"));

    let translated =
        SubtitleCollection::parse_srt_string(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let texts: Vec<&str> = translated.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["olleH", "dlroW", "eyB"]);

    // Timestamps and ordering are untouched
    let original = SubtitleCollection::parse_srt_string(&common::sample_srt()).unwrap();
    for (before, after) in original.entries.iter().zip(translated.entries.iter()) {
        assert_eq!(before.seq_num, after.seq_num);
        assert_eq!(before.start_time_ms, after.start_time_ms);
        assert_eq!(before.end_time_ms, after.end_time_ms);
    }
}

/// Progress is reported exactly N times, strictly increasing from 1 to N
#[tokio::test]
async fn test_run_withThreeCues_shouldReportProgressExactlyThreeTimes() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "movie.srt", &common::sample_srt());

    let controller = controller_with(
        MockProvider::with_catalog(common::default_catalog()),
        dir.path().to_path_buf(),
    );

    let mut calls = Vec::new();
    controller
        .run(&input, "en", "pt", |current, total| {
            calls.push((current, total));
        })
        .await
        .unwrap();

    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
}

/// A failure on one cue keeps its original text, translates the rest, and
/// still completes the run
#[tokio::test]
async fn test_run_withOneFailingCue_shouldKeepOriginalTextForItOnly() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "movie.srt", &common::sample_srt());

    let provider = MockProvider::with_catalog(common::default_catalog())
        .with_behavior(MockBehavior::FailOnCalls(vec![2]));
    let controller = controller_with(provider, dir.path().to_path_buf());

    let output = controller
        .run(&input, "en", "pt", |_, _| {})
        .await
        .unwrap();

    let translated =
        SubtitleCollection::parse_srt_string(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let texts: Vec<&str> = translated.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["olleH", "World", "eyB"]);
}

/// An empty document reaches Done with zero callbacks and a zero-cue output
#[tokio::test]
async fn test_run_withEmptyDocument_shouldSucceedWithoutProgress() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "empty.srt", "");

    let controller = controller_with(
        MockProvider::with_catalog(common::default_catalog()),
        dir.path().to_path_buf(),
    );

    let mut calls = 0usize;
    let output = controller
        .run(&input, "en", "pt", |_, _| calls += 1)
        .await
        .unwrap();

    assert_eq!(calls, 0);
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(SubtitleCollection::parse_srt_string(&written).unwrap().is_empty());
}

/// No matching model: the run fails before any translation work and
/// produces no output file
#[tokio::test]
async fn test_run_withUnknownLanguagePair_shouldFailWithResolveError() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "movie.srt", &common::sample_srt());

    let controller = controller_with(
        MockProvider::with_catalog(vec!["Helsinki-NLP/opus-mt-fr-de"]),
        dir.path().to_path_buf(),
    );

    let mut calls = 0usize;
    let err = controller
        .run(&input, "en", "zu", |_, _| calls += 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Resolve(_)));
    assert_eq!(calls, 0);
    assert!(!dir.path().join("translated_movie.srt").exists());
}

/// A session-construction failure after a successful catalog match: the run
/// fails with a resolve error before any translation work
#[tokio::test]
async fn test_run_withFailingSessionLoad_shouldFailWithResolveError() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "movie.srt", &common::sample_srt());

    let provider = MockProvider::with_catalog(common::default_catalog()).with_failing_loads();
    let controller = controller_with(provider, dir.path().to_path_buf());

    let mut calls = 0usize;
    let err = controller
        .run(&input, "en", "pt", |_, _| calls += 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Resolve(ResolveError::ModelLoad { .. })));
    assert_eq!(calls, 0);
    assert!(!dir.path().join("translated_movie.srt").exists());
}

/// An unwritable destination is fatal even when every cue translated: the
/// completed work is discarded and no output appears anywhere
#[tokio::test]
async fn test_run_withUnwritableOutputDir_shouldFailWithWriteError() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "movie.srt", &common::sample_srt());

    // A regular file in place of the output directory defeats the write
    // regardless of process privileges
    let blocked = dir.path().join("not-a-directory");
    std::fs::write(&blocked, "occupied").unwrap();

    let controller = controller_with(
        MockProvider::with_catalog(common::default_catalog()),
        blocked.clone(),
    );

    let mut calls = Vec::new();
    let err = controller
        .run(&input, "en", "pt", |current, total| calls.push((current, total)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Write(_)));
    // Translation itself ran to completion before the write failed
    assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
    assert!(!blocked.join("translated_movie.srt").exists());
}

/// A malformed input is fatal before translation: no progress, no output
#[tokio::test]
async fn test_run_withMalformedInput_shouldFailWithParseError() {
    let dir = tempdir().unwrap();
    let input = common::write_srt(dir.path(), "broken.srt", "1\nthis is not a timestamp\nHi\n\n");

    let controller = controller_with(
        MockProvider::with_catalog(common::default_catalog()),
        dir.path().to_path_buf(),
    );

    let mut calls = 0usize;
    let err = controller
        .run(&input, "en", "pt", |_, _| calls += 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Subtitle(_)));
    assert_eq!(calls, 0);
    assert!(!dir.path().join("translated_broken.srt").exists());
}
