use log::{debug, info};

use crate::errors::ResolveError;
use crate::language_utils::short_code;
use crate::providers::{ModelProvider, ModelSession};

// @module: Language pair to translation model resolution

/// Fixed prefix of the translation model family
pub const MODEL_PREFIX: &str = "opus-mt";

/// Build the ordered list of model naming patterns for a language pair,
/// most specific first.
///
/// The exact codes are tried before their two-letter truncations, and the
/// plain family before the "tc-big" and "tc" (terminology-constrained)
/// variants.
pub fn search_patterns(src_lang: &str, tgt_lang: &str) -> Vec<String> {
    let src2 = short_code(src_lang);
    let tgt2 = short_code(tgt_lang);

    vec![
        format!("{}-{}-{}", MODEL_PREFIX, src_lang, tgt_lang),
        format!("{}-{}-{}", MODEL_PREFIX, src2, tgt2),
        format!("{}-tc-big-{}-{}", MODEL_PREFIX, src_lang, tgt_lang),
        format!("{}-tc-big-{}-{}", MODEL_PREFIX, src2, tgt2),
        format!("{}-tc-{}-{}", MODEL_PREFIX, src_lang, tgt_lang),
        format!("{}-tc-{}-{}", MODEL_PREFIX, src2, tgt2),
    ]
}

/// Pick the best-matching model from a catalog listing.
///
/// Patterns are tried in priority order against the whole catalog; within the
/// first pattern that matches anything, ties are broken lexicographically so
/// the pick stays stable across catalog updates.
pub fn find_best_match<'a>(models: &'a [String], patterns: &[String]) -> Option<&'a str> {
    for pattern in patterns {
        let winner = models
            .iter()
            .filter(|m| m.contains(pattern.as_str()))
            .min_by(|a, b| a.as_str().cmp(b.as_str()));

        if let Some(model) = winner {
            return Some(model.as_str());
        }
    }
    None
}

/// Resolves a language pair to a ready-to-use translation session
pub struct ModelResolver {
    /// The model provider to search and load from
    provider: Box<dyn ModelProvider>,
}

impl ModelResolver {
    /// Create a resolver over the given provider
    pub fn new(provider: Box<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Resolve a source/target language pair to a loaded session.
    ///
    /// Resolution is attempted exactly once: no retry on catalog or load
    /// failures. When no catalog entry matches any pattern, no session load
    /// is attempted at all.
    pub async fn resolve(
        &self,
        src_lang: &str,
        tgt_lang: &str,
    ) -> Result<Box<dyn ModelSession>, ResolveError> {
        let patterns = search_patterns(src_lang, tgt_lang);
        debug!("Model search patterns: {:?}", patterns);

        let models = self
            .provider
            .list_models()
            .await
            .map_err(|source| ResolveError::ModelLoad {
                model: "catalog".to_string(),
                source,
            })?;

        let model_id = find_best_match(&models, &patterns)
            .ok_or_else(|| ResolveError::ModelNotFound {
                src: src_lang.to_string(),
                tgt: tgt_lang.to_string(),
            })?
            .to_string();

        info!("Resolved {} -> {} to model {}", src_lang, tgt_lang, model_id);

        self.provider
            .load_session(&model_id)
            .await
            .map_err(|source| ResolveError::ModelLoad { model: model_id, source })
    }
}
