//! Entry points that take a document from bytes (or a file) to a finished run.

use std::path::Path;

use tracing::info_span;

use crate::error::ProcessError;
use crate::processor::{DocumentFormat, ProcessorRegistry};
use crate::sanitize;

use super::error::PipelineError;
use super::progress::{ProgressEvent, ProgressReporter, WorkflowStep};
use super::runner::Pipeline;
use super::state::WorkflowState;

/// Extracts text from `bytes` and runs the pipeline on it.
///
/// Unreadable content, unsupported formats and blank text all stop here with
/// [`PipelineError::ExtractionFailure`]; the workflow is never entered.
pub fn ingest_document(
    registry: &ProcessorRegistry,
    pipeline: &Pipeline,
    bytes: &[u8],
    format: DocumentFormat,
    progress: &dyn ProgressReporter,
) -> Result<WorkflowState, PipelineError> {
    let text = registry.extract_or_empty(bytes, format);
    start_run(pipeline, WorkflowState::new(text), progress)
}

/// Reads a file, derives its format from the extension and ingests it.
///
/// The failure reason names the file but never its directory.
pub fn ingest_path(
    registry: &ProcessorRegistry,
    pipeline: &Pipeline,
    path: &Path,
    progress: &dyn ProgressReporter,
) -> Result<WorkflowState, PipelineError> {
    let filename = sanitize::redact_path(path);
    let _span = info_span!("ingest", filename = %filename).entered();

    let state = registry
        .extract_path(path)
        .map_err(|e| PipelineError::ExtractionFailure {
            reason: match e {
                ProcessError::ReadDocument { source, .. } => {
                    format!("cannot read {}: {}", filename, source)
                }
                other => format!("{}: {}", filename, other),
            },
        })
        .and_then(WorkflowState::new);

    start_run(pipeline, state, progress)
}

fn start_run(
    pipeline: &Pipeline,
    state: Result<WorkflowState, PipelineError>,
    progress: &dyn ProgressReporter,
) -> Result<WorkflowState, PipelineError> {
    match state {
        Ok(state) => pipeline.run(state, progress),
        Err(e) => {
            progress.report(ProgressEvent::Failed {
                step: WorkflowStep::ParseDocument,
                error: e.to_string(),
            });
            Err(e)
        }
    }
}
