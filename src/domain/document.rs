#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
}

impl ContentType {
    /// Resolves the type of an uploaded file. Browsers frequently label PDFs
    /// as `application/octet-stream`, in which case the extension decides.
    pub fn from_upload(mime: Option<&str>, filename: &str) -> Option<Self> {
        match mime {
            Some("application/pdf") => Some(Self::Pdf),
            None | Some("application/octet-stream") if has_pdf_extension(filename) => {
                Some(Self::Pdf)
            }
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
        }
    }
}

fn has_pdf_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            filename,
            content_type,
            size_bytes,
        }
    }
}
