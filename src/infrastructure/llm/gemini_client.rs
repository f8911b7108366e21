use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::LlmSettings;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Generative Language API (`generateContent`).
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    timeout_secs: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
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
                .unwrap_or(GEMINI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.to_string(),
            model: model.trim_start_matches("models/").to_string(),
            temperature,
            max_output_tokens: settings.max_output_tokens,
            timeout_secs: settings.timeout_seconds,
        })
    }

    /// Confirms the model identity exists and the key is accepted.
    #[tracing::instrument(skip(self), fields(model = %self.model))]
    pub async fn verify_model(&self) -> Result<(), LlmClientError> {
        let response = self
            .client
            .get(format!("{}/v1beta/models/{}", self.base_url, self.model))
            .header(API_KEY_HEADER, &self.api_key)
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
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, &self.api_key)
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

        let generated: GenerateContentResponse = self
            .check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        if let Some(reason) = generated
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(LlmClientError::InvalidResponse(format!(
                "prompt blocked: {reason}"
            )));
        }

        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty candidates".to_string()))?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
