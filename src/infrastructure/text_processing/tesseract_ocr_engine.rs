use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{OcrEngine, OcrError};
use crate::presentation::config::ExtractionSettings;

/// Runs the `tesseract` command-line tool once per page image.
pub struct TesseractOcrEngine {
    binary: String,
    language: String,
    timeout: Duration,
}

impl TesseractOcrEngine {
    pub fn new(binary: impl Into<String>, language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self::new(
            settings.tesseract_path.clone(),
            settings.ocr_language.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    /// Checks that the binary can be executed.
    pub async fn health_check(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| OcrError::Unavailable(format!("{}: {e}", self.binary)))?;

        if !output.status.success() {
            return Err(OcrError::Unavailable(format!(
                "{} --version exited with {}",
                self.binary, output.status
            )));
        }

        // Older releases print the version banner on stderr.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };

        Ok(String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl OcrEngine for TesseractOcrEngine {
    #[tracing::instrument(skip(self, png), fields(png_bytes = png.len()))]
    async fn recognize(&self, png: &[u8], page_index: usize) -> Result<String, OcrError> {
        let failed = |reason: String| OcrError::RecognitionFailed {
            page: page_index,
            reason,
        };

        let mut image_file = tempfile::Builder::new()
            .prefix("ocr-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| failed(format!("failed to create temp image: {e}")))?;
        image_file
            .write_all(png)
            .and_then(|_| image_file.flush())
            .map_err(|e| failed(format!("failed to write temp image: {e}")))?;

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.binary)
                .arg(image_file.path())
                .arg("stdout")
                .arg("-l")
                .arg(&self.language)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| OcrError::Timeout(page_index))?
        .map_err(|e| OcrError::Unavailable(format!("{}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "exit {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
