use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object};

use crate::error::ProcessError;
use crate::processor::{DocumentFormat, DocumentProcessor};

/// Header of the trailer section listing link targets found in the PDF.
/// The extraction prompt refers to this marker by name.
pub const HYPERLINK_TRAILER_HEADER: &str = "--- DETECTED HYPERLINKS ---";

pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor for PdfProcessor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("processor.pdf").entered();

        let doc = Document::load_mem(bytes)
            .map_err(|e| ProcessError::PdfProcessing(format!("Failed to load PDF: {}", e)))?;

        let mut text = extract_text_from_pdf(&doc);
        let links = collect_hyperlinks(&doc);

        tracing::debug!(pages = doc.get_pages().len(), links = links.len(), "PDF parsed");

        append_hyperlink_trailer(&mut text, &links);
        Ok(text)
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Pdf)
    }
}

fn extract_text_from_pdf(doc: &Document) -> String {
    let mut text = String::new();

    for (page_num, _) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => tracing::debug!("No text on page {}: {}", page_num, e),
        }
    }

    text
}

/// Collects every URI link annotation across all pages, deduplicated and sorted.
fn collect_hyperlinks(doc: &Document) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    for (_, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Some(annots) = page
            .get(b"Annots")
            .ok()
            .and_then(|o| resolve(doc, o))
            .and_then(|o| o.as_array().ok())
        else {
            continue;
        };

        for annot in annots {
            if let Some(uri) = resolve(doc, annot)
                .and_then(|o| o.as_dict().ok())
                .and_then(|annot| link_uri(doc, annot))
            {
                links.insert(uri);
            }
        }
    }

    links
}

fn link_uri(doc: &Document, annot: &Dictionary) -> Option<String> {
    let action = annot
        .get(b"A")
        .ok()
        .and_then(|o| resolve(doc, o))
        .and_then(|o| o.as_dict().ok())?;

    match resolve(doc, action.get(b"URI").ok()?)? {
        Object::String(bytes, _) => {
            let uri = decode_pdf_string(bytes);
            let uri = uri.trim();
            (!uri.is_empty()).then(|| uri.to_string())
        }
        _ => None,
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Decodes a PDF text string: UTF-16BE when it carries a byte-order mark,
/// otherwise treated as single-byte text.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn append_hyperlink_trailer(text: &mut String, links: &BTreeSet<String>) {
    if links.is_empty() {
        return;
    }

    text.push_str("\n\n");
    text.push_str(HYPERLINK_TRAILER_HEADER);
    text.push('\n');
    for link in links {
        text.push_str(link);
        text.push('\n');
    }
}
