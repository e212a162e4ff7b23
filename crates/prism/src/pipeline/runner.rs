use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::ai::InferenceClient;
use crate::db::ProfileStore;
use crate::sanitize;

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::progress::{ProgressEvent, ProgressReporter, WorkflowStep};
use super::state::WorkflowState;

pub const MSG_ALREADY_EXISTS: &str = "Profile with this email already exists.";
pub const MSG_NO_EMAIL: &str = "No email found in resume. Inserting new profile.";
pub const MSG_INSERTED: &str = "Successfully extracted and added new profile to the database!";

/// Runs the fixed document-to-profile workflow.
///
/// ```text
/// parse_document → check_if_resume ─(not a resume)→ END
///                        ↓
///              extract_profile_info → check_database ─(exists)→ END
///                                           ↓
///                                    add_to_database → END
/// ```
///
/// Extraction runs at most once and insert runs at most once per call.
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    inference: Arc<dyn InferenceClient>,
    store: Arc<dyn ProfileStore>,
}

impl Pipeline {
    pub fn new(
        config: Arc<PipelineConfig>,
        inference: Arc<dyn InferenceClient>,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            config,
            inference,
            store,
        }
    }

    /// Run the workflow for a single document and return its terminal state.
    pub fn run(
        &self,
        mut state: WorkflowState,
        progress: &dyn ProgressReporter,
    ) -> Result<WorkflowState, PipelineError> {
        let _pipeline_span =
            info_span!("pipeline", text_chars = state.file_content().chars().count()).entered();

        // Step 1: Parse document (text already extracted by the caller)
        {
            let _step = info_span!("parse_document").entered();
            enter(WorkflowStep::ParseDocument, progress);
        }

        // Step 2: Classify
        {
            let _step = info_span!("check_if_resume").entered();
            enter(WorkflowStep::CheckIfResume, progress);
            if let Err(e) = self.step_check_if_resume(&mut state) {
                return Err(fail(WorkflowStep::CheckIfResume, e, progress));
            }
        }

        if state.is_resume != Some(true) {
            return Ok(finish(state, progress));
        }

        // Step 3: Extract profile
        {
            let _step = info_span!("extract_profile_info").entered();
            enter(WorkflowStep::ExtractProfileInfo, progress);
            if let Err(e) = self.step_extract_profile_info(&mut state) {
                return Err(fail(WorkflowStep::ExtractProfileInfo, e, progress));
            }
        }

        // Step 4: Deduplicate on email
        {
            let _step = info_span!("check_database").entered();
            enter(WorkflowStep::CheckDatabase, progress);
            if let Err(e) = self.step_check_database(&mut state) {
                return Err(fail(WorkflowStep::CheckDatabase, e, progress));
            }
        }

        if state.profile_exists_in_db != Some(false) {
            return Ok(finish(state, progress));
        }

        // Step 5: Insert
        {
            let _step = info_span!("add_to_database").entered();
            enter(WorkflowStep::AddToDatabase, progress);
            if let Err(e) = self.step_add_to_database(&mut state) {
                return Err(fail(WorkflowStep::AddToDatabase, e, progress));
            }
        }

        Ok(finish(state, progress))
    }

    fn step_check_if_resume(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        let prefix = truncate_chars(state.file_content(), self.config.classify_prefix_chars);

        let verdict = self
            .inference
            .classify(prefix)
            .map_err(PipelineError::ClassificationFailure)?;

        debug!(is_resume = verdict.is_resume, "Classification verdict");

        state.is_resume = Some(verdict.is_resume);
        if !verdict.is_resume {
            state.final_message = Some(verdict.reason);
        }
        Ok(())
    }

    fn step_extract_profile_info(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        let profile = self
            .inference
            .extract(state.file_content())
            .map_err(PipelineError::ProfileExtractionFailure)?;

        debug!(
            has_email = profile.email.is_some(),
            skills = profile.top_skills.len(),
            education = profile.education.len(),
            work_experience = profile.work_experience.len(),
            "Profile extracted"
        );

        state.profile_data = Some(profile);
        Ok(())
    }

    fn step_check_database(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        let profile = state
            .profile_data
            .as_ref()
            .ok_or(PipelineError::InvalidState("no profile to check"))?;

        let Some(email) = profile.email_key() else {
            info!("No email on extracted profile");
            state.profile_exists_in_db = Some(false);
            state.final_message = Some(MSG_NO_EMAIL.to_string());
            return Ok(());
        };

        let existing = self.store.exists(&email)?;
        info!(
            email = %sanitize::redact_email(&email),
            found = existing.is_some(),
            "Checked profile store"
        );

        state.profile_exists_in_db = Some(existing.is_some());
        if existing.is_some() {
            state.existing_profile_data = existing;
            state.final_message = Some(MSG_ALREADY_EXISTS.to_string());
        }
        Ok(())
    }

    fn step_add_to_database(&self, state: &mut WorkflowState) -> Result<(), PipelineError> {
        let profile = state
            .profile_data
            .as_ref()
            .ok_or(PipelineError::InvalidState("no profile to insert"))?;

        self.store.insert(profile)?;

        state.profile_inserted = true;
        state.final_message = Some(MSG_INSERTED.to_string());
        Ok(())
    }
}

fn enter(step: WorkflowStep, progress: &dyn ProgressReporter) {
    progress.report(ProgressEvent::Step {
        step,
        message: step.status_message().to_string(),
    });
}

fn fail(step: WorkflowStep, err: PipelineError, progress: &dyn ProgressReporter) -> PipelineError {
    warn!(step = step.as_str(), error = %err, "Pipeline step failed");
    progress.report(ProgressEvent::Failed {
        step,
        error: err.to_string(),
    });
    err
}

fn finish(state: WorkflowState, progress: &dyn ProgressReporter) -> WorkflowState {
    if let Some(outcome) = state.outcome() {
        info!(outcome = outcome.as_str(), "Pipeline finished");
        progress.report(ProgressEvent::Completed {
            outcome,
            message: state.final_message.clone().unwrap_or_default(),
        });
    }
    state
}

/// Returns at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
