use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, OcrEngine};
use crate::domain::{ContentType, Document};
use crate::presentation::config::ExtractionSettings;

use super::pdf_rasterizer::{RasterOptions, rasterize_pages};
use super::text_sanitizer::sanitize_extracted_text;

pub const PDF_MAGIC: &[u8] = b"%PDF";

/// Renders every page of a PDF and runs OCR over each page image.
pub struct OcrPdfLoader {
    ocr_engine: Arc<dyn OcrEngine>,
    raster_options: RasterOptions,
    render_timeout: Duration,
}

impl OcrPdfLoader {
    pub fn new(ocr_engine: Arc<dyn OcrEngine>, settings: &ExtractionSettings) -> Self {
        Self {
            ocr_engine,
            raster_options: RasterOptions::from(settings),
            render_timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }
}

#[async_trait]
impl FileLoader for OcrPdfLoader {
    #[tracing::instrument(
        skip(self, data),
        fields(
            filename = %document.filename,
            size_bytes = document.size_bytes,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        if !data.starts_with(PDF_MAGIC) {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "{} is not a valid PDF (missing %PDF header)",
                document.filename
            )));
        }

        // Removed on drop, whichever way this function returns.
        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();
        let options = self.raster_options.clone();

        let pages = tokio::time::timeout(
            self.render_timeout,
            tokio::task::spawn_blocking(move || rasterize_pages(&temp_path, &options)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF rendering timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::debug!(page_count = pages.len(), "PDF pages rendered");

        recognize_pages(self.ocr_engine.as_ref(), &pages, &document.filename).await
    }
}

/// OCRs rendered pages in order and joins the sanitized text of every
/// non-empty page with a blank line. Stops at the first page that fails.
pub async fn recognize_pages(
    ocr_engine: &dyn OcrEngine,
    pages: &[Vec<u8>],
    filename: &str,
) -> Result<String, FileLoaderError> {
    let mut page_texts = Vec::with_capacity(pages.len());
    for (page_index, png) in pages.iter().enumerate() {
        let raw = ocr_engine.recognize(png, page_index).await?;
        let text = sanitize_extracted_text(&raw);
        tracing::debug!(page = page_index + 1, chars = text.len(), "Page recognized");
        if !text.is_empty() {
            page_texts.push(text);
        }
    }

    tracing::info!(
        page_count = pages.len(),
        pages_with_text = page_texts.len(),
        "PDF text extraction complete"
    );

    // A scan with no readable text is an error, not an empty record.
    if page_texts.is_empty() {
        return Err(FileLoaderError::NoTextFound(filename.to_string()));
    }

    Ok(page_texts.join("\n\n"))
}
