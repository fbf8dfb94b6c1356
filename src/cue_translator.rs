use log::warn;

use crate::errors::ProviderError;
use crate::providers::ModelSession;

// @module: Per-cue translation with local failure recovery

/// The outcome of translating one cue
#[derive(Debug)]
pub struct CueTranslation {
    /// The text to put back into the cue: the translation, or the original
    /// text when translation failed
    pub text: String,
    /// The error that was absorbed, if this cue failed
    pub error: Option<ProviderError>,
}

impl CueTranslation {
    /// Whether this cue kept its original text because translation failed
    pub fn is_recovered(&self) -> bool {
        self.error.is_some()
    }
}

/// Translate a single cue's text through the session.
///
/// Failures are deliberately downgraded here: the error is logged and the
/// original text is returned, so one bad cue never aborts the run or loses
/// translations already computed for other cues.
pub async fn translate_cue(session: &dyn ModelSession, text: &str) -> CueTranslation {
    let translated = async {
        let tokens = session.generate(text).await?;
        session.decode(&tokens)
    }
    .await;

    match translated {
        Ok(text) => CueTranslation { text, error: None },
        Err(error) => {
            warn!("Cue translation failed, keeping original text: {}", error);
            CueTranslation {
                text: text.to_string(),
                error: Some(error),
            }
        }
    }
}
