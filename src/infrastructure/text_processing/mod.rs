mod mock_file_loader;
mod ocr_pdf_loader;
mod pdf_rasterizer;
mod tesseract_ocr_engine;
mod text_sanitizer;

pub use mock_file_loader::MockFileLoader;
pub use ocr_pdf_loader::{OcrPdfLoader, PDF_MAGIC, recognize_pages};
pub use pdf_rasterizer::RasterOptions;
pub use tesseract_ocr_engine::TesseractOcrEngine;
pub use text_sanitizer::sanitize_extracted_text;
