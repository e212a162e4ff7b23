pub mod docx;
pub mod pdf;
pub mod text;

use std::path::Path;

use tracing::warn;

use crate::error::ProcessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "txt",
        }
    }
}

pub trait DocumentProcessor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError>;
    fn supports(&self, format: DocumentFormat) -> bool;
}

/// Routes raw document bytes to the processor for their declared format.
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn DocumentProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        let processors: Vec<Box<dyn DocumentProcessor>> = vec![
            Box::new(text::TextProcessor::new()),
            Box::new(pdf::PdfProcessor::new()),
            Box::new(docx::DocxProcessor::new()),
        ];

        Self { processors }
    }

    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ProcessError> {
        for processor in &self.processors {
            if processor.supports(format) {
                return processor.extract(bytes);
            }
        }

        Err(ProcessError::UnsupportedFormat(
            format.extension().to_string(),
        ))
    }

    /// Like [`extract`](Self::extract) but collapses every failure into empty
    /// text. Callers must treat empty text as a parse failure.
    pub fn extract_or_empty(&self, bytes: &[u8], format: DocumentFormat) -> String {
        match self.extract(bytes, format) {
            Ok(text) => text,
            Err(e) => {
                warn!("Text extraction failed: {}", e);
                String::new()
            }
        }
    }

    /// Reads a file and extracts its text, deriving the format from the extension.
    pub fn extract_path(&self, path: &Path) -> Result<String, ProcessError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format = DocumentFormat::from_extension(extension)
            .ok_or_else(|| ProcessError::UnsupportedFormat(extension.to_string()))?;

        let bytes = std::fs::read(path).map_err(|e| ProcessError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.extract(&bytes, format)
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
