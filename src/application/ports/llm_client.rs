use async_trait::async_trait;

/// A handle to one hosted model identity at a fixed sampling temperature.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends a fully rendered prompt and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;

    fn model(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
