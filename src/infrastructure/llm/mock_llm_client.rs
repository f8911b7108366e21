use crate::application::ports::{LlmClient, LlmClientError};

/// Returns a fixed completion without any network access.
pub struct MockLlmClient {
    completion: String,
}

impl MockLlmClient {
    pub fn new(completion: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new("Mock answer")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.completion.clone())
    }

    fn model(&self) -> &str {
        "mock"
    }
}
