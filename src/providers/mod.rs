/*!
 * Provider implementations for translation model access.
 *
 * This module defines the seam between the translation pipeline and the
 * machine-translation backend:
 * - `ModelProvider`: catalog listing and session loading for a publisher namespace
 * - `ModelSession`: one loaded model, a translate function plus its decoder
 * - `huggingface`: Hugging Face Hub catalog + Inference API implementation
 * - `mock`: deterministic in-memory implementation for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One unit of raw model output: a generated token with its surface text
#[derive(Debug, Clone, PartialEq)]
pub struct OutputToken {
    /// Token id in the model's vocabulary
    pub id: u32,
    /// Surface text of the token
    pub text: String,
    /// Whether this is a special/control token (BOS, EOS, padding)
    pub special: bool,
}

impl OutputToken {
    /// A regular text token
    pub fn text(id: u32, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), special: false }
    }

    /// A special/control token, skipped during decoding
    pub fn special(id: u32, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), special: true }
    }
}

/// A loaded translation model: the translate function and its decoder.
///
/// A session is created once per pipeline run by the model resolver and is
/// never cached or shared across runs.
#[async_trait]
pub trait ModelSession: Send + Sync + Debug {
    /// The catalog identifier of the model this session was loaded from
    fn model_id(&self) -> &str;

    /// Run the translate function: text in, token sequence out
    async fn generate(&self, text: &str) -> Result<Vec<OutputToken>, ProviderError>;

    /// Decode a token sequence back into text, skipping special tokens
    fn decode(&self, tokens: &[OutputToken]) -> Result<String, ProviderError>;
}

/// Access to a publisher's model catalog and to session construction
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// List the model identifiers published under the provider namespace
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;

    /// Load a translation session for a concrete model identifier
    async fn load_session(&self, model_id: &str) -> Result<Box<dyn ModelSession>, ProviderError>;
}

pub mod huggingface;
pub mod mock;
