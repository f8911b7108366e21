use std::sync::Arc;

use crate::application::ports::{DocumentStore, LlmClientError, RepositoryError};
use crate::domain::{ConversationTurn, DocumentRecord, SourceMode};

use super::answer_generator::{AnswerGenerator, GenerationError};
use super::conversation_history::ConversationHistory;
use super::response_formatter::format_generated_text;

/// Routes a query to the document store, the model, or both, and composes
/// a single response string.
pub struct ChatService {
    document_store: Arc<dyn DocumentStore>,
    answer_generator: Arc<AnswerGenerator>,
    history: Option<ConversationHistory>,
}

impl ChatService {
    pub fn new(
        document_store: Arc<dyn DocumentStore>,
        answer_generator: Arc<AnswerGenerator>,
        history: Option<ConversationHistory>,
    ) -> Self {
        Self {
            document_store,
            answer_generator,
            history,
        }
    }

    pub fn history_enabled(&self) -> bool {
        self.history.is_some()
    }

    /// In `Both` mode the store is searched before the model is called, and
    /// a failure of either aborts the whole request.
    #[tracing::instrument(skip(self, query), fields(source = %mode))]
    pub async fn answer(&self, query: &str, mode: SourceMode) -> Result<String, ChatError> {
        let response = match mode {
            SourceMode::Database => self.search_documents(query).await?,
            SourceMode::Internet => self.generate_answer(query).await?,
            SourceMode::Both => {
                let database = self.search_documents(query).await?;
                let internet = self.generate_answer(query).await?;
                format!("Database Results:\n{database}\n\nInternet Results:\n{internet}")
            }
        };

        if let Some(history) = &self.history {
            history
                .record(ConversationTurn::new(query.to_string(), response.clone()))
                .await;
        }

        Ok(response)
    }

    /// `None` when history is disabled for this deployment.
    pub async fn history(&self) -> Option<Vec<ConversationTurn>> {
        match &self.history {
            Some(history) => Some(history.turns().await),
            None => None,
        }
    }

    async fn search_documents(&self, query: &str) -> Result<String, ChatError> {
        let records = self.document_store.search(query).await?;
        tracing::debug!(matches = records.len(), "Document search complete");

        Ok(records
            .iter()
            .map(render_record)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    async fn generate_answer(&self, query: &str) -> Result<String, ChatError> {
        let completion = self.answer_generator.generate(query).await?;
        Ok(format_generated_text(&completion))
    }
}

fn render_record(record: &DocumentRecord) -> String {
    format!("Document: {}\nText: {}", record.name, record.text)
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("search: {0}")]
    Search(#[from] RepositoryError),
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),
}

impl ChatError {
    pub fn is_model_not_found(&self) -> bool {
        matches!(
            self,
            ChatError::Generation(GenerationError::Llm(LlmClientError::ModelNotFound(_)))
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ChatError::Generation(GenerationError::Llm(LlmClientError::Timeout(_)))
        )
    }
}
