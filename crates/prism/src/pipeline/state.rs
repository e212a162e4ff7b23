use serde::Serialize;

use crate::profile::ResumeProfile;

use super::error::PipelineError;

/// Terminal outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NotAResume,
    AlreadyExists,
    Inserted,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAResume => "not_a_resume",
            Self::AlreadyExists => "already_exists",
            Self::Inserted => "inserted",
        }
    }
}

/// The record threaded through every step of one run.
///
/// Each field is written by exactly one step; `None` means that step has
/// not run (or, for `existing_profile_data`, that nothing was found).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowState {
    #[serde(skip)]
    file_content: String,
    pub is_resume: Option<bool>,
    pub profile_data: Option<ResumeProfile>,
    pub profile_exists_in_db: Option<bool>,
    pub existing_profile_data: Option<ResumeProfile>,
    /// Set only after the store confirmed the insert.
    pub profile_inserted: bool,
    pub final_message: Option<String>,
}

impl WorkflowState {
    /// Creates the initial state. Blank text is a parse failure and never
    /// enters the workflow.
    pub fn new(file_content: impl Into<String>) -> Result<Self, PipelineError> {
        let file_content = file_content.into();
        if file_content.trim().is_empty() {
            return Err(PipelineError::ExtractionFailure {
                reason: "document contains no text".to_string(),
            });
        }

        Ok(Self {
            file_content,
            is_resume: None,
            profile_data: None,
            profile_exists_in_db: None,
            existing_profile_data: None,
            profile_inserted: false,
            final_message: None,
        })
    }

    pub fn file_content(&self) -> &str {
        &self.file_content
    }

    /// The terminal outcome, or `None` if the run has not reached one.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_resume == Some(false) {
            Some(Outcome::NotAResume)
        } else if self.profile_exists_in_db == Some(true) {
            Some(Outcome::AlreadyExists)
        } else if self.profile_inserted {
            Some(Outcome::Inserted)
        } else {
            None
        }
    }
}
