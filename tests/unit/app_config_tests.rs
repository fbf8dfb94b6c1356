/*!
 * Tests for configuration and credential persistence
 */

use srtai::app_config::Config;
use tempfile::tempdir;

/// Test that loading a missing config yields defaults
#[test]
fn test_load_withMissingFile_shouldReturnDefaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(dir.path().join("config.json")).unwrap();

    assert!(config.hf_token.is_none());
}

/// Test save then load round trip of the token
#[test]
fn test_save_load_withToken_shouldRoundTrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("srtai/config.json");

    let config = Config {
        hf_token: Some("hf_test_token".to_string()),
    };
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.hf_token.as_deref(), Some("hf_test_token"));
}

/// Test that a malformed config file is an error rather than silent defaults
#[test]
fn test_load_withMalformedFile_shouldFail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load(&path).is_err());
}
