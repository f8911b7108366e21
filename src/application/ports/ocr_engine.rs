use async_trait::async_trait;

/// Recognizes the text in a single rendered page image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, png: &[u8], page_index: usize) -> Result<String, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("ocr engine unavailable: {0}")]
    Unavailable(String),
    #[error("ocr failed on page {page}: {reason}")]
    RecognitionFailed { page: usize, reason: String },
    #[error("ocr timed out on page {0}")]
    Timeout(usize),
}
