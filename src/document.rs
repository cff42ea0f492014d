//! Accepted upload formats

use crate::types::{ClientError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Value for the file picker's `accept` attribute
pub const ACCEPT_ATTR: &str = ".pdf,.docx";

/// Document formats the backend can ingest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::Docx => DOCX_MIME,
        }
    }
}

/// A file picked by the user
pub trait UploadSource {
    fn file_name(&self) -> String;
    fn mime_type(&self) -> String;
}

impl UploadSource for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn mime_type(&self) -> String {
        self.type_()
    }
}

/// Check the picked file before any request is made.
pub fn check_upload<F: UploadSource + ?Sized>(file: &F) -> Result<DocumentKind> {
    let mime = file.mime_type();
    DocumentKind::from_mime(&mime).ok_or_else(|| {
        let shown = if mime.is_empty() { file.file_name() } else { mime };
        ClientError::UnsupportedFileType(shown)
    })
}
