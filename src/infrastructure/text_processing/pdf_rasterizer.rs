use std::path::Path;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::FileLoaderError;
use crate::presentation::config::ExtractionSettings;

const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub dpi: f32,
    pub max_pages: usize,
    pub library_dir: Option<String>,
}

impl From<&ExtractionSettings> for RasterOptions {
    fn from(settings: &ExtractionSettings) -> Self {
        Self {
            dpi: settings.render_dpi,
            // pdfium addresses pages with a u16.
            max_pages: settings.max_pages.min(usize::from(u16::MAX)),
            library_dir: settings.pdfium_library_dir.clone(),
        }
    }
}

fn bind_pdfium(library_dir: Option<&str>) -> Result<Pdfium, FileLoaderError> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(&Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| FileLoaderError::ExtractionFailed(format!("pdfium bind failed: {e}")))?;

    Ok(Pdfium::new(bindings))
}

/// Renders each page of the PDF at `path` to PNG bytes, in page order.
/// Blocking; call from `spawn_blocking`.
pub(super) fn rasterize_pages(
    path: &Path,
    options: &RasterOptions,
) -> Result<Vec<Vec<u8>>, FileLoaderError> {
    let pdfium = bind_pdfium(options.library_dir.as_deref())?;

    let doc = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("pdfium open failed: {e}")))?;

    let page_count = doc.pages().len() as usize;
    let pages_to_render = page_count.min(options.max_pages);
    if pages_to_render < page_count {
        tracing::warn!(
            page_count,
            max_pages = options.max_pages,
            "PDF exceeds page limit, trailing pages skipped"
        );
    }

    let mut png_buffers: Vec<Vec<u8>> = Vec::with_capacity(pages_to_render);

    for index in 0..pages_to_render {
        let page = doc.pages().get(index as u16).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("page {index} access failed: {e}"))
        })?;

        let width = (page.width().value * options.dpi / POINTS_PER_INCH) as i32;
        let height = (page.height().value * options.dpi / POINTS_PER_INCH) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("render page {index} failed: {e}"))
            })?;

        let mut png_bytes: Vec<u8> = Vec::new();
        bitmap
            .as_image()
            .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("PNG encode page {index} failed: {e}"))
            })?;

        png_buffers.push(png_bytes);
    }

    Ok(png_buffers)
}
