/*!
 * Common test utilities shared by unit and integration tests
 */

use std::fs;
use std::path::{Path, PathBuf};

/// A small well-formed SRT document with three cues
pub fn sample_srt() -> String {
    "1\n\
     00:00:01,000 --> 00:00:02,500\n\
     Hello\n\
     \n\
     2\n\
     00:00:03,000 --> 00:00:04,000\n\
     World\n\
     \n\
     3\n\
     00:00:05,250 --> 00:00:06,750\n\
     Bye\n\
     \n"
        .to_string()
}

/// Write SRT content to a file under the given directory
pub fn write_srt(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write test SRT file");
    path
}

/// The catalog fixture most tests resolve against
pub fn default_catalog() -> Vec<&'static str> {
    vec![
        "Helsinki-NLP/opus-mt-en-de",
        "Helsinki-NLP/opus-mt-en-pt",
        "Helsinki-NLP/opus-mt-fr-en",
    ]
}
