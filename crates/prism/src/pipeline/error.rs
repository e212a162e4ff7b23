use thiserror::Error;

use crate::ai::InferenceError;
use crate::db::DatabaseError;

/// Failures that abort a pipeline run. Not-a-resume and duplicate profiles
/// are outcomes, not errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to extract text from file: {reason}")]
    ExtractionFailure { reason: String },

    #[error("Resume classification failed: {0}")]
    ClassificationFailure(#[source] InferenceError),

    #[error("Profile extraction failed: {0}")]
    ProfileExtractionFailure(#[source] InferenceError),

    #[error("Profile store unavailable: {0}")]
    StoreUnavailable(#[from] DatabaseError),

    #[error("Invalid workflow state: {0}")]
    InvalidState(&'static str),
}
