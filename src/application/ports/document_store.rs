use async_trait::async_trait;

use crate::domain::DocumentRecord;

use super::RepositoryError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends a record. Records with the same name are kept side by side.
    async fn store(&self, record: &DocumentRecord) -> Result<(), RepositoryError>;

    /// Returns every record whose text matches `pattern` as a
    /// case-insensitive regular expression. A pattern that does not compile
    /// is matched literally.
    async fn search(&self, pattern: &str) -> Result<Vec<DocumentRecord>, RepositoryError>;
}
