//! The document-to-profile workflow.

pub mod config;
pub mod error;
pub mod ingest;
pub mod progress;
pub mod runner;
pub mod state;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use ingest::{ingest_document, ingest_path};
pub use progress::{CollectingProgress, NoopProgress, ProgressEvent, ProgressReporter, WorkflowStep};
pub use runner::Pipeline;
pub use state::{Outcome, WorkflowState};
