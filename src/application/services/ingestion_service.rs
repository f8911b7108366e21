use std::sync::Arc;

use crate::application::ports::{DocumentStore, FileLoader, FileLoaderError, RepositoryError};
use crate::domain::{ContentType, Document, DocumentRecord};

/// Extracts text from an uploaded document and appends it to the store.
pub struct IngestionService {
    file_loader: Arc<dyn FileLoader>,
    document_store: Arc<dyn DocumentStore>,
}

impl IngestionService {
    pub fn new(file_loader: Arc<dyn FileLoader>, document_store: Arc<dyn DocumentStore>) -> Self {
        Self {
            file_loader,
            document_store,
        }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn ingest(
        &self,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<DocumentRecord, IngestionError> {
        let document = Document::new(filename, content_type, data.len() as u64);

        let text = self.file_loader.extract_text(data, &document).await?;

        let record = DocumentRecord::new(document.filename, text);
        self.document_store.store(&record).await?;

        tracing::info!(
            name = %record.name,
            text_chars = record.text.len(),
            "Extracted text stored"
        );

        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),
}
