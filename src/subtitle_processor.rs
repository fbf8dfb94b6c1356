use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @module: SRT parsing and composition

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number (1-based, stable across parse/compose)
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow::anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// An ordered collection of subtitle cues forming one document
#[derive(Debug, Default)]
pub struct SubtitleCollection {
    /// List of subtitle entries, in document order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty subtitle collection
    pub fn new() -> Self {
        SubtitleCollection { entries: Vec::new() }
    }

    /// Parse SRT content into an ordered collection of cues.
    ///
    /// The grammar is strict: index line, timestamp line, one or more text lines,
    /// blank separator. Any row violating this is a parse error and no partial
    /// result is produced. An empty document parses to zero cues.
    pub fn parse_srt_string(content: &str) -> Result<Self, SubtitleError> {
        let mut entries = Vec::new();
        let mut lines = content.lines().enumerate().peekable();

        loop {
            // Skip blank separator lines between entries
            while matches!(lines.peek(), Some((_, l)) if l.trim().is_empty()) {
                lines.next();
            }

            let Some((line_idx, index_line)) = lines.next() else {
                break;
            };

            let seq_num: usize =
                index_line.trim().parse().map_err(|_| SubtitleError::Parse {
                    line: line_idx + 1,
                    reason: format!("expected cue index, found {:?}", index_line.trim()),
                })?;

            let Some((ts_idx, ts_line)) = lines.next() else {
                return Err(SubtitleError::Parse {
                    line: line_idx + 2,
                    reason: "unexpected end of input, expected timestamp line".to_string(),
                });
            };

            let caps = TIMESTAMP_REGEX.captures(ts_line.trim()).ok_or_else(|| {
                SubtitleError::Parse {
                    line: ts_idx + 1,
                    reason: format!("expected timestamp line, found {:?}", ts_line.trim()),
                }
            })?;

            let start_time_ms = Self::capture_to_ms(&caps, 1);
            let end_time_ms = Self::capture_to_ms(&caps, 5);

            // One or more text lines, up to the next blank line or end of input
            let mut text = String::new();
            while let Some((_, l)) = lines.peek() {
                if l.trim().is_empty() {
                    break;
                }
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(lines.next().map(|(_, l)| l.trim_end()).unwrap_or(""));
            }

            if text.trim().is_empty() {
                return Err(SubtitleError::Parse {
                    line: ts_idx + 2,
                    reason: format!("cue {} has no text lines", seq_num),
                });
            }

            entries.push(SubtitleEntry::new(seq_num, start_time_ms, end_time_ms, text));
        }

        Ok(SubtitleCollection { entries })
    }

    /// Compose the collection back into SRT text
    pub fn compose(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            // Display already ends each entry with a blank separator line
            out.push_str(&entry.to_string());
        }
        out
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        file.write_all(self.compose().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }

    /// Number of cues in the document
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no cues
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn capture_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        // The regex only admits \d{2}/\d{3} groups, so these parses cannot fail
        let field = |i: usize| -> u64 {
            caps.get(start_idx + i)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        (field(0) * 3600 + field(1) * 60 + field(2)) * 1000 + field(3)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
