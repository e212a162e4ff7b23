//! Test harness for isolated pipeline runs.
//!
//! `TestHarness` owns a temp directory with an on-disk database and wires a
//! [`ScriptedInference`] and a [`CountingStore`] into a real `Pipeline`, so
//! tests can drive documents end to end without a network.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use prism::pipeline::CollectingProgress;
use prism::{
    ingest_document, ingest_path, Database, DatabaseError, DocumentFormat, InferenceError,
    IsResumeVerdict, Pipeline, PipelineConfig, PipelineError, ProcessorRegistry, ProfileStore,
    ProfileSummary, ResumeProfile, WorkflowState,
};

/// Inference double that answers from a script and records every request.
///
/// Documents containing `not_resume_marker` are classified as not a resume;
/// everything else is a resume and extracts to `profile`.
pub struct ScriptedInference {
    profile: Mutex<ResumeProfile>,
    not_resume_marker: String,
    not_resume_reason: String,
    fail_classify: Option<String>,
    fail_extract: Option<String>,
    classify_inputs: Mutex<Vec<String>>,
    extract_inputs: Mutex<Vec<String>>,
}

impl ScriptedInference {
    pub fn new(profile: ResumeProfile) -> Self {
        Self {
            profile: Mutex::new(profile),
            not_resume_marker: "Dear Hiring Manager".to_string(),
            not_resume_reason: "The document is a cover letter, not a resume.".to_string(),
            fail_classify: None,
            fail_extract: None,
            classify_inputs: Mutex::new(Vec::new()),
            extract_inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_classify(mut self, message: &str) -> Self {
        self.fail_classify = Some(message.to_string());
        self
    }

    pub fn failing_extract(mut self, message: &str) -> Self {
        self.fail_extract = Some(message.to_string());
        self
    }

    /// Replaces the profile returned by later extractions.
    pub fn set_profile(&self, profile: ResumeProfile) {
        *self.profile.lock().unwrap() = profile;
    }

    pub fn not_resume_reason(&self) -> &str {
        &self.not_resume_reason
    }

    pub fn classify_inputs(&self) -> Vec<String> {
        self.classify_inputs.lock().unwrap().clone()
    }

    pub fn extract_inputs(&self) -> Vec<String> {
        self.extract_inputs.lock().unwrap().clone()
    }
}

impl prism::InferenceClient for ScriptedInference {
    fn classify(&self, text: &str) -> Result<IsResumeVerdict, InferenceError> {
        self.classify_inputs.lock().unwrap().push(text.to_string());
        if let Some(message) = &self.fail_classify {
            return Err(InferenceError::MalformedJson(message.clone()));
        }

        if text.contains(&self.not_resume_marker) {
            Ok(IsResumeVerdict {
                is_resume: false,
                reason: self.not_resume_reason.clone(),
            })
        } else {
            Ok(IsResumeVerdict {
                is_resume: true,
                reason: "Contains experience, education and skills sections.".to_string(),
            })
        }
    }

    fn extract(&self, text: &str) -> Result<ResumeProfile, InferenceError> {
        self.extract_inputs.lock().unwrap().push(text.to_string());
        if let Some(message) = &self.fail_extract {
            return Err(InferenceError::MalformedJson(message.clone()));
        }
        Ok(self.profile.lock().unwrap().clone().normalized())
    }
}

/// Wraps a real `Database` and counts store calls.
pub struct CountingStore {
    inner: Database,
    exists_calls: AtomicUsize,
    insert_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Database) -> Self {
        Self {
            inner,
            exists_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
        }
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

impl ProfileStore for CountingStore {
    fn exists(&self, email: &str) -> Result<Option<ResumeProfile>, DatabaseError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(email)
    }

    fn insert(&self, profile: &ResumeProfile) -> Result<(), DatabaseError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(profile)
    }

    fn list_all(&self) -> Result<Vec<ProfileSummary>, DatabaseError> {
        self.inner.list_all()
    }
}

/// Isolated environment: temp dir, on-disk database and a wired pipeline.
pub struct TestHarness {
    temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub db: Database,
    pub inference: Arc<ScriptedInference>,
    pub store: Arc<CountingStore>,
    pub registry: ProcessorRegistry,
    pipeline: Pipeline,
}

impl TestHarness {
    pub fn new(profile: ResumeProfile) -> Self {
        Self::with_inference(ScriptedInference::new(profile), PipelineConfig::default())
    }

    pub fn with_inference(inference: ScriptedInference, config: PipelineConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input_dir = temp_dir.path().join("input");
        std::fs::create_dir_all(&input_dir).expect("Failed to create input dir");

        let db = Database::open(&temp_dir.path().join("data").join("prism.db"))
            .expect("Failed to open database");
        let inference = Arc::new(inference);
        let store = Arc::new(CountingStore::new(db.clone()));
        let pipeline = Pipeline::new(Arc::new(config), inference.clone(), store.clone());

        Self {
            temp_dir,
            input_dir,
            db,
            inference,
            store,
            registry: ProcessorRegistry::new(),
            pipeline,
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a test input file to the input directory.
    pub fn write_input(&self, filename: &str, content: &[u8]) -> PathBuf {
        let path = self.input_dir.join(filename);
        std::fs::write(&path, content).expect("Failed to write input file");
        path
    }

    pub fn run_bytes(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> (Result<WorkflowState, PipelineError>, CollectingProgress) {
        let progress = CollectingProgress::new();
        let result = ingest_document(&self.registry, &self.pipeline, bytes, format, &progress);
        (result, progress)
    }

    pub fn run_text(&self, text: &str) -> Result<WorkflowState, PipelineError> {
        self.run_bytes(text.as_bytes(), DocumentFormat::Text).0
    }

    pub fn run_file(
        &self,
        path: &Path,
    ) -> (Result<WorkflowState, PipelineError>, CollectingProgress) {
        let progress = CollectingProgress::new();
        let result = ingest_path(&self.registry, &self.pipeline, path, &progress);
        (result, progress)
    }

    pub fn stored_count(&self) -> usize {
        self.db.list_all().expect("Failed to list profiles").len()
    }
}
