mod document_store;
mod file_loader;
mod llm_client;
mod ocr_engine;
mod repository_error;

pub use document_store::DocumentStore;
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use ocr_engine::{OcrEngine, OcrError};
pub use repository_error::RepositoryError;
