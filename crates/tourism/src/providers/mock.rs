use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::errors::ProviderError;
use crate::providers::base::{Completion, Provider, Usage};

/// A call as the provider received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
}

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<String, ProviderError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the calls received so far, usable after the provider is boxed
    pub fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok(Completion::new("", Usage::default()))
        } else {
            responses
                .remove(0)
                .map(|text| Completion::new(text, Usage::new(Some(1), Some(1), Some(2))))
        }
    }
}
