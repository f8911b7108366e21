use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::LlmSettings;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        settings: &LlmSettings,
        api_key: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings
                .base_url
                .as_deref()
                .unwrap_or(OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
            max_tokens: settings.max_output_tokens,
            timeout_secs: settings.timeout_seconds,
        })
    }

    #[tracing::instrument(skip(self), fields(model = %self.model))]
    pub async fn verify_model(&self) -> Result<(), LlmClientError> {
        let response = self
            .client
            .get(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(&self, response: Response) -> Result<Response, LlmClientError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(LlmClientError::ModelNotFound(self.model.clone())),
            StatusCode::TOO_MANY_REQUESTS => Err(LlmClientError::RateLimited),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(LlmClientError::ApiRequestFailed(format!(
                    "HTTP {}: {}",
                    status, body
                )))
            }
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmClientError::Timeout(self.timeout_secs)
                } else {
                    LlmClientError::ApiRequestFailed(e.to_string())
                }
            })?;

        let completion: ChatCompletionResponse = self
            .check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
