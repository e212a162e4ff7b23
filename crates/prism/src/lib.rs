pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod profile;
pub mod sanitize;
pub mod secrets;

pub use ai::{ChatCompletionsClient, InferenceClient, InferenceError};
pub use config::{load_config, load_config_or_default, Config};
pub use db::{Database, DatabaseError, ProfileStore};
pub use error::{ConfigError, ProcessError};
pub use pipeline::{
    ingest_document, ingest_path, Outcome, Pipeline, PipelineConfig, PipelineError, WorkflowState,
};
pub use processor::{DocumentFormat, ProcessorRegistry};
pub use profile::{IsResumeVerdict, ProfileSummary, ResumeProfile};
pub use secrets::{resolve_secret, SecretError};
