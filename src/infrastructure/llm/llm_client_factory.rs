use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::{GeminiClient, OpenAiClient};

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("missing API key: {0} is empty")]
    MissingApiKey(String),
    #[error("no usable model among {tried:?}: {source}")]
    NoUsableModel {
        tried: Vec<String>,
        #[source]
        source: LlmClientError,
    },
}

impl LlmClientFactory {
    /// Connects to the preferred model, falling back to the secondary model
    /// when the preferred one cannot be initialized.
    pub async fn connect(
        settings: &LlmSettings,
        api_key: &str,
        temperature: f32,
    ) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        if api_key.trim().is_empty() {
            return Err(LlmClientFactoryError::MissingApiKey(
                settings.api_key_env.clone(),
            ));
        }

        let mut candidates = vec![settings.preferred_model.clone()];
        if let Some(fallback) = settings
            .fallback_model
            .as_ref()
            .filter(|fallback| **fallback != settings.preferred_model)
        {
            candidates.push(fallback.clone());
        }

        let mut last_error = None;
        for model in &candidates {
            match Self::connect_model(settings, api_key, model, temperature).await {
                Ok(client) => {
                    tracing::info!(
                        provider = ?settings.provider,
                        model = %model,
                        temperature,
                        "Chatbot initialized"
                    );
                    return Ok(client);
                }
                Err(e) => {
                    tracing::warn!(model = %model, error = %e, "Model initialization failed");
                    last_error = Some(e);
                }
            }
        }

        Err(LlmClientFactoryError::NoUsableModel {
            tried: candidates,
            source: last_error.unwrap_or_else(|| {
                LlmClientError::ApiRequestFailed("no model configured".to_string())
            }),
        })
    }

    async fn connect_model(
        settings: &LlmSettings,
        api_key: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        match settings.provider {
            LlmProvider::Gemini => {
                let client = GeminiClient::new(settings, api_key, model, temperature)?;
                client.verify_model().await?;
                Ok(Arc::new(client))
            }
            LlmProvider::OpenAi => {
                let client = OpenAiClient::new(settings, api_key, model, temperature)?;
                client.verify_model().await?;
                Ok(Arc::new(client))
            }
        }
    }
}
