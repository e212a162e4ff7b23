//! Errors for configuration loading and document text extraction.
//!
//! Inference, storage and pipeline failures live next to their modules
//! (`ai::InferenceError`, `db::DatabaseError`, `pipeline::PipelineError`).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config is not valid JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    /// One or more violations of `schema/config-v1.json`, joined with "; ".
    #[error("Config does not match schema: {errors}")]
    SchemaValidation { errors: String },
}

/// Why a document yielded no text.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot read document '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable PDF: {0}")]
    PdfProcessing(String),

    #[error("Unreadable DOCX: {0}")]
    DocxProcessing(String),

    #[error("Text decoding failed: {0}")]
    TextExtraction(String),
}
