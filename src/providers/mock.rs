/*!
 * Mock provider implementations for testing.
 *
 * This module provides an in-memory catalog plus deterministic sessions:
 * - `MockBehavior::Reverse` - translation reverses the input text
 * - `MockBehavior::Failing` - every generation call fails
 * - `MockBehavior::FailOnCalls` - specific calls fail, the rest reverse
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{ModelProvider, ModelSession, OutputToken};

/// Behavior mode for mock sessions
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, translating text to its reverse
    Reverse,
    /// Always fails with an error
    Failing,
    /// Fails on the given 1-based generation calls, reverses otherwise
    FailOnCalls(Vec<usize>),
}

/// Mock provider with a fixed in-memory catalog
pub struct MockProvider {
    /// Catalog entries returned by `list_models`
    catalog: Vec<String>,
    /// Behavior handed to sessions created by `load_session`
    behavior: MockBehavior,
    /// When set, `list_models` fails as if the catalog were unreachable
    catalog_unreachable: bool,
    /// When set, `load_session` fails after matching succeeded
    load_fails: bool,
    /// Number of `load_session` calls observed
    load_calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a mock provider exposing the given catalog, with reversing sessions
    pub fn with_catalog(catalog: Vec<&str>) -> Self {
        Self {
            catalog: catalog.into_iter().map(String::from).collect(),
            behavior: MockBehavior::Reverse,
            catalog_unreachable: false,
            load_fails: false,
            load_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Use the given behavior for all sessions created by this provider
    pub fn with_behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Make `load_session` fail even though the catalog match succeeded
    pub fn with_failing_loads(mut self) -> Self {
        self.load_fails = true;
        self
    }

    /// Make `list_models` fail as if the remote catalog were unreachable
    pub fn unreachable_catalog() -> Self {
        Self {
            catalog: Vec::new(),
            behavior: MockBehavior::Reverse,
            catalog_unreachable: true,
            load_fails: false,
            load_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many sessions were requested from this provider
    pub fn load_count(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Handle onto the load counter, usable after the provider is boxed away
    pub fn load_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.load_calls)
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        if self.catalog_unreachable {
            return Err(ProviderError::RequestFailed(
                "mock catalog unreachable".to_string(),
            ));
        }
        Ok(self.catalog.clone())
    }

    async fn load_session(&self, model_id: &str) -> Result<Box<dyn ModelSession>, ProviderError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.load_fails {
            return Err(ProviderError::RequestFailed(format!(
                "mock load failure for {}",
                model_id
            )));
        }
        Ok(Box::new(MockSession::new(model_id, self.behavior.clone())))
    }
}

/// Mock session producing deterministic token sequences
#[derive(Debug)]
pub struct MockSession {
    model_id: String,
    behavior: MockBehavior,
    generate_calls: AtomicUsize,
}

impl MockSession {
    /// Create a mock session with the given behavior
    pub fn new(model_id: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            model_id: model_id.into(),
            behavior,
            generate_calls: AtomicUsize::new(0),
        }
    }

    /// A reversing session, the common case in tests
    pub fn reversing() -> Self {
        Self::new("mock/opus-mt-en-pt", MockBehavior::Reverse)
    }

    /// A session whose every generation call fails
    pub fn failing() -> Self {
        Self::new("mock/opus-mt-en-pt", MockBehavior::Failing)
    }
}

#[async_trait]
impl ModelSession for MockSession {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, text: &str) -> Result<Vec<OutputToken>, ProviderError> {
        let call = self.generate_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let fail = match &self.behavior {
            MockBehavior::Reverse => false,
            MockBehavior::Failing => true,
            MockBehavior::FailOnCalls(calls) => calls.contains(&call),
        };
        if fail {
            return Err(ProviderError::RequestFailed(format!(
                "mock inference failure on call {}",
                call
            )));
        }

        // Reverse the text, one character per token, framed by special tokens
        // so decoding has something to skip.
        let mut tokens = vec![OutputToken::special(0, "<pad>")];
        tokens.extend(
            text.chars()
                .rev()
                .map(|c| OutputToken::text(c as u32, c.to_string())),
        );
        tokens.push(OutputToken::special(1, "</s>"));
        Ok(tokens)
    }

    fn decode(&self, tokens: &[OutputToken]) -> Result<String, ProviderError> {
        Ok(tokens
            .iter()
            .filter(|t| !t.special)
            .map(|t| t.text.as_str())
            .collect())
    }
}
