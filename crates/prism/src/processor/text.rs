use crate::error::ProcessError;
use crate::processor::{DocumentFormat, DocumentProcessor};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub struct TextProcessor;

impl TextProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor for TextProcessor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        String::from_utf8(bytes.to_vec())
            .map_err(|e| ProcessError::TextExtraction(format!("Invalid UTF-8: {}", e)))
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Text)
    }
}
