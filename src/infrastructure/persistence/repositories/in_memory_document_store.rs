use async_trait::async_trait;
use regex::RegexBuilder;
use tokio::sync::RwLock;

use crate::application::ports::{DocumentStore, RepositoryError};
use crate::domain::DocumentRecord;

use super::super::search_regex;

/// Process-local store for deployments without a database, and for tests.
/// Records are returned in insertion order.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    records: RwLock<Vec<DocumentRecord>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DocumentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn store(&self, record: &DocumentRecord) -> Result<(), RepositoryError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn search(&self, pattern: &str) -> Result<Vec<DocumentRecord>, RepositoryError> {
        let matcher = RegexBuilder::new(&search_regex(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| matcher.is_match(&record.text))
            .cloned()
            .collect())
    }
}
