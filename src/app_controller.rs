use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::cue_translator::translate_cue;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::model_resolver::ModelResolver;
use crate::subtitle_processor::SubtitleCollection;

// @module: Translation pipeline orchestration

/// Main controller for one-file subtitle translation runs.
///
/// A run moves through Resolving, Translating and Writing; per-cue failures
/// are absorbed inside the cue translator, so once translation has started
/// the only remaining fatal step is writing the output.
pub struct Controller {
    /// The resolver used to turn a language pair into a session
    resolver: ModelResolver,
    /// Destination directory for translated files
    output_dir: PathBuf,
}

impl Controller {
    /// Create a controller writing to the default Downloads directory
    pub fn new(resolver: ModelResolver) -> Self {
        Self::with_output_dir(resolver, FileManager::default_output_dir())
    }

    /// Create a controller writing to an explicit output directory
    pub fn with_output_dir(resolver: ModelResolver, output_dir: PathBuf) -> Self {
        Self { resolver, output_dir }
    }

    /// Translate one subtitle file.
    ///
    /// The progress callback receives `(cues_completed, cues_total)` after
    /// each cue, synchronously and in order: exactly N calls for N cues,
    /// none when parsing fails or the document is empty.
    ///
    /// Returns the path the translated document was written to. A failed run
    /// produces no output file at all.
    pub async fn run<F>(
        &self,
        input_file: &Path,
        src_lang: &str,
        tgt_lang: &str,
        mut progress_cb: F,
    ) -> Result<PathBuf, AppError>
    where
        F: FnMut(usize, usize),
    {
        // Resolving: one attempt, fatal on failure
        let session = self.resolver.resolve(src_lang, tgt_lang).await?;
        debug!("Using model {}", session.model_id());

        let content = FileManager::read_to_string(input_file)
            .map_err(|e| AppError::Read(e.to_string()))?;
        let mut subtitles = SubtitleCollection::parse_srt_string(&content)?;

        // Translating: strictly sequential, cue failures recovered in place
        let total = subtitles.len();
        info!(
            "Translating {} cues from {} to {}",
            total, src_lang, tgt_lang
        );

        let mut recovered = 0usize;
        for (i, entry) in subtitles.entries.iter_mut().enumerate() {
            let outcome = translate_cue(session.as_ref(), &entry.text).await;
            if outcome.is_recovered() {
                recovered += 1;
            }
            entry.text = outcome.text;
            progress_cb(i + 1, total);
        }

        if recovered > 0 {
            warn!(
                "{} of {} cues kept their original text after translation failures",
                recovered, total
            );
        }

        // Writing: fatal on failure, no partial output
        let output_path = FileManager::translated_output_path(input_file, &self.output_dir);
        subtitles
            .write_to_srt(&output_path)
            .map_err(|e| AppError::Write(e.to_string()))?;

        info!("Wrote translated subtitles to {}", output_path.display());
        Ok(output_path)
    }
}
