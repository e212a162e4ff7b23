//! Language-model inference for resume classification and profile extraction.
//!
//! The pipeline talks to [`InferenceClient`]; [`ChatCompletionsClient`] is the
//! production implementation over an OpenAI-compatible HTTP endpoint.

pub mod client;
pub mod prompts;
pub mod validate;

use thiserror::Error;

use crate::profile::{IsResumeVerdict, ResumeProfile};

pub use client::ChatCompletionsClient;
pub use validate::StructuredSchema;

/// Errors from an inference call. Every variant fails the calling step.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Inference request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Model returned malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Model output violates schema '{schema}': {errors}")]
    SchemaViolation {
        schema: &'static str,
        errors: String,
    },

    #[error("Invalid output schema: {0}")]
    Schema(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InferenceError::Timeout
        } else {
            InferenceError::Http(e)
        }
    }
}

/// Structured-output model calls used by the pipeline.
///
/// Both operations return schema-validated values or an error; neither
/// retries.
pub trait InferenceClient: Send + Sync {
    /// Decides whether `text` is a resume or CV.
    fn classify(&self, text: &str) -> Result<IsResumeVerdict, InferenceError>;

    /// Extracts a normalized profile from resume text.
    fn extract(&self, text: &str) -> Result<ResumeProfile, InferenceError>;
}
