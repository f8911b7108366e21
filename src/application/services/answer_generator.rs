use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{PromptTemplate, PromptTemplateError};

/// Name of the template slot that receives the user's query.
pub const QUERY_VARIABLE: &str = "input";

/// A model handle bound to a prompt template.
pub struct AnswerGenerator {
    llm_client: Arc<dyn LlmClient>,
    template: PromptTemplate,
    timeout: Duration,
}

impl AnswerGenerator {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        template: PromptTemplate,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let variables = template.input_variables();
        if variables.len() != 1 || variables[0] != QUERY_VARIABLE {
            return Err(GenerationError::UnsupportedVariables(variables.to_vec()));
        }

        tracing::info!(model = llm_client.model(), "Prompt template bound");

        Ok(Self {
            llm_client,
            template,
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        self.llm_client.model()
    }

    /// Substitutes `query` into the template and returns the raw completion.
    #[tracing::instrument(skip(self, query), fields(model = %self.llm_client.model()))]
    pub async fn generate(&self, query: &str) -> Result<String, GenerationError> {
        let prompt = self.template.render(&[(QUERY_VARIABLE, query)])?;
        let started = Instant::now();

        let completion = tokio::time::timeout(self.timeout, self.llm_client.complete(&prompt))
            .await
            .map_err(|_| LlmClientError::Timeout(self.timeout.as_secs()))?
            .inspect_err(|e| tracing::error!(error = %e, "Error during response generation"))?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            completion_chars = completion.len(),
            "Response generated successfully"
        );

        Ok(completion)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("template must declare exactly the 'input' variable, found {0:?}")]
    UnsupportedVariables(Vec<String>),
    #[error("template: {0}")]
    Template(#[from] PromptTemplateError),
    #[error(transparent)]
    Llm(#[from] LlmClientError),
}
