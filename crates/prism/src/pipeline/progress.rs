use std::sync::Mutex;

use serde::Serialize;

use super::state::Outcome;

/// The fixed steps of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    ParseDocument,
    CheckIfResume,
    ExtractProfileInfo,
    CheckDatabase,
    AddToDatabase,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseDocument => "parse_document",
            Self::CheckIfResume => "check_if_resume",
            Self::ExtractProfileInfo => "extract_profile_info",
            Self::CheckDatabase => "check_database",
            Self::AddToDatabase => "add_to_database",
        }
    }

    /// Operator-facing status line shown when the step starts.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::ParseDocument => "Parsing document...",
            Self::CheckIfResume => "Verifying if document is a resume...",
            Self::ExtractProfileInfo => "Extracting detailed profile information...",
            Self::CheckDatabase => "Checking database for existing profile...",
            Self::AddToDatabase => "Adding new profile to database...",
        }
    }
}

/// Events emitted by the pipeline during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Step {
        step: WorkflowStep,
        message: String,
    },
    Completed {
        outcome: Outcome,
        message: String,
    },
    Failed {
        step: WorkflowStep,
        error: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Records every event so callers can render or assert on the run afterwards.
#[derive(Default)]
pub struct CollectingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Steps that were started, in order.
    pub fn steps(&self) -> Vec<WorkflowStep> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Step { step, .. } => Some(step),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for CollectingProgress {
    fn report(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
