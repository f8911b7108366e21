#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use miningniti::application::ports::{DocumentStore, LlmClient, LlmClientError, RepositoryError};
use miningniti::application::services::{AnswerGenerator, ChatService, ConversationHistory};
use miningniti::domain::{DocumentRecord, PromptTemplate};
use miningniti::infrastructure::persistence::InMemoryDocumentStore;

pub const TEST_TEMPLATE: &str = "You are a mining assistant.\nQuestion: {input}\nAnswer:";
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub enum Reply {
    Text(String),
    ModelNotFound,
    Failure,
    Hang,
}

/// Scripted model that remembers every prompt it receives.
pub struct ScriptedLlmClient {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlmClient {
    pub fn replying(text: &str) -> Self {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn with(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::ModelNotFound => Err(LlmClientError::ModelNotFound("gemini-pro".to_string())),
            Reply::Failure => Err(LlmClientError::ApiRequestFailed(
                "HTTP 500: upstream exploded".to_string(),
            )),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// In-memory store that counts searches and can be told to fail.
pub struct CountingDocumentStore {
    inner: InMemoryDocumentStore,
    searches: AtomicUsize,
    fail: bool,
}

impl CountingDocumentStore {
    pub fn with_records(records: &[(&str, &str)]) -> Self {
        Self {
            inner: InMemoryDocumentStore::with_records(
                records
                    .iter()
                    .map(|(name, text)| DocumentRecord::new(name.to_string(), text.to_string()))
                    .collect(),
            ),
            searches: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_records(&[])
        }
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl DocumentStore for CountingDocumentStore {
    async fn store(&self, record: &DocumentRecord) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::QueryFailed("store is down".to_string()));
        }
        self.inner.store(record).await
    }

    async fn search(&self, pattern: &str) -> Result<Vec<DocumentRecord>, RepositoryError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::QueryFailed("store is down".to_string()));
        }
        self.inner.search(pattern).await
    }
}

pub fn test_template() -> PromptTemplate {
    PromptTemplate::new(TEST_TEMPLATE, vec!["input".to_string()]).unwrap()
}

pub fn generator(llm: Arc<ScriptedLlmClient>) -> Arc<AnswerGenerator> {
    Arc::new(AnswerGenerator::new(llm, test_template(), TEST_TIMEOUT).unwrap())
}

pub fn chat_service(
    store: Arc<CountingDocumentStore>,
    llm: Arc<ScriptedLlmClient>,
    history_entries: Option<usize>,
) -> ChatService {
    ChatService::new(
        store,
        generator(llm),
        history_entries.map(ConversationHistory::new),
    )
}
