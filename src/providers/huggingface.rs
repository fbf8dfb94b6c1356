use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{ModelProvider, ModelSession, OutputToken};

/// The publisher namespace under which translation models are cataloged
pub const MODEL_AUTHOR: &str = "Helsinki-NLP";

const HUB_ENDPOINT: &str = "https://huggingface.co";
const INFERENCE_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// SentencePiece word-boundary marker used by the Marian vocabularies
const WORD_BOUNDARY: char = '\u{2581}';

/// Hugging Face client: Hub catalog listing plus Inference API sessions
pub struct HuggingFace {
    /// HTTP client for API requests
    client: Client,
    /// API token forwarded verbatim as a bearer credential
    token: String,
    /// Hub endpoint URL (overridable for tests)
    hub_endpoint: String,
    /// Inference endpoint URL (overridable for tests)
    inference_endpoint: String,
}

/// A catalog entry as returned by the Hub model listing
#[derive(Debug, Deserialize)]
struct HubModel {
    /// The model identifier, e.g. "Helsinki-NLP/opus-mt-en-pt"
    #[serde(rename = "modelId", alias = "id")]
    model_id: String,
}

/// Inference API request body
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    /// The text to translate
    inputs: &'a str,
    /// Generation parameters
    parameters: InferenceParameters,
    /// API options
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    /// Request per-token details so the decoder can skip special tokens
    details: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    /// Block until the model is loaded instead of failing with 503
    wait_for_model: bool,
}

/// One result object from the Inference API
#[derive(Debug, Deserialize)]
struct InferenceResult {
    /// Set when the endpoint runs the translation pipeline
    #[serde(default)]
    translation_text: Option<String>,
    /// Set when the endpoint runs text generation
    #[serde(default)]
    generated_text: Option<String>,
    /// Per-token generation details, when available
    #[serde(default)]
    details: Option<GenerationDetails>,
}

#[derive(Debug, Deserialize)]
struct GenerationDetails {
    #[serde(default)]
    tokens: Vec<ApiToken>,
}

#[derive(Debug, Deserialize)]
struct ApiToken {
    id: u32,
    text: String,
    #[serde(default)]
    special: bool,
}

impl HuggingFace {
    /// Create a new Hugging Face client with the given API token
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoints(token, HUB_ENDPOINT, INFERENCE_ENDPOINT)
    }

    /// Create a client against custom endpoints (used by tests)
    pub fn with_endpoints(
        token: impl Into<String>,
        hub_endpoint: impl Into<String>,
        inference_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            token: token.into(),
            hub_endpoint: hub_endpoint.into(),
            inference_endpoint: inference_endpoint.into(),
        }
    }

    /// Attach the bearer credential, unless no token was supplied at all
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.header("Authorization", format!("Bearer {}", self.token))
        }
    }
}

#[async_trait]
impl ModelProvider for HuggingFace {
    /// List the model identifiers published by the provider namespace
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!(
            "{}/api/models?author={}",
            self.hub_endpoint.trim_end_matches('/'),
            MODEL_AUTHOR
        );

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Hub listing failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::AuthenticationError(format!(
                "Hub rejected the API token ({})",
                status
            )));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Hub listing error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let models: Vec<HubModel> = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Hub listing: {}", e)))?;

        debug!("Hub listed {} models for {}", models.len(), MODEL_AUTHOR);
        Ok(models.into_iter().map(|m| m.model_id).collect())
    }

    /// Load an inference session for a concrete model identifier.
    ///
    /// Verifies against the Hub that the model actually exists and is readable
    /// with the supplied token, so load failures surface here rather than on
    /// the first cue.
    async fn load_session(&self, model_id: &str) -> Result<Box<dyn ModelSession>, ProviderError> {
        let url = format!(
            "{}/api/models/{}",
            self.hub_endpoint.trim_end_matches('/'),
            model_id
        );

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("model lookup failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::AuthenticationError(format!(
                "token rejected for model {} ({})",
                model_id, status
            )));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(Box::new(HfSession {
            client: self.client.clone(),
            model_id: model_id.to_string(),
            token: self.token.clone(),
            inference_endpoint: self.inference_endpoint.clone(),
        }))
    }
}

/// One loaded Inference API session for a concrete model
#[derive(Debug)]
pub struct HfSession {
    client: Client,
    model_id: String,
    token: String,
    inference_endpoint: String,
}

#[async_trait]
impl ModelSession for HfSession {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, text: &str) -> Result<Vec<OutputToken>, ProviderError> {
        let url = format!(
            "{}/models/{}",
            self.inference_endpoint.trim_end_matches('/'),
            self.model_id
        );

        let request = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters { details: true },
            options: InferenceOptions { wait_for_model: true },
        };

        let mut builder = self.client.post(&url).json(&request);
        if !self.token.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("inference request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let results: Vec<InferenceResult> = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("inference response: {}", e)))?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ParseError("empty inference response".to_string()))?;

        // Prefer real token details; fall back to wrapping the pipeline's
        // plain-text output as a single pseudo-token.
        if let Some(details) = result.details {
            if !details.tokens.is_empty() {
                return Ok(details
                    .tokens
                    .into_iter()
                    .map(|t| OutputToken { id: t.id, text: t.text, special: t.special })
                    .collect());
            }
        }

        let text = result
            .translation_text
            .or(result.generated_text)
            .ok_or_else(|| {
                ProviderError::ParseError("inference response carried no text".to_string())
            })?;

        Ok(vec![OutputToken::text(0, text)])
    }

    fn decode(&self, tokens: &[OutputToken]) -> Result<String, ProviderError> {
        let joined: String = tokens
            .iter()
            .filter(|t| !t.special)
            .map(|t| t.text.as_str())
            .collect();

        // SentencePiece marks word boundaries instead of emitting spaces
        Ok(joined.replace(WORD_BOUNDARY, " ").trim().to_string())
    }
}
