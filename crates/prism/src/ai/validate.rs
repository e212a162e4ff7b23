//! Schema-checked decoding of model output.
//!
//! Model content is parsed as JSON, validated against an embedded JSON Schema
//! and only then deserialized. Anything that fails a stage is rejected.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::InferenceError;

const IS_RESUME_SCHEMA: &str = include_str!("../../../../schema/is-resume.json");
const RESUME_PROFILE_SCHEMA: &str = include_str!("../../../../schema/resume-profile.json");

/// A JSON Schema compiled once and reused for every response.
pub struct StructuredSchema {
    name: &'static str,
    raw: Value,
    validator: jsonschema::Validator,
}

impl StructuredSchema {
    pub fn compile(name: &'static str, source: &str) -> Result<Self, InferenceError> {
        let raw: Value = serde_json::from_str(source).map_err(|e| {
            InferenceError::Schema(format!("Invalid embedded schema '{}': {}", name, e))
        })?;

        let validator = jsonschema::validator_for(&raw).map_err(|e| {
            InferenceError::Schema(format!("Failed to compile schema '{}': {}", name, e))
        })?;

        Ok(Self {
            name,
            raw,
            validator,
        })
    }

    pub fn is_resume() -> Result<Self, InferenceError> {
        Self::compile("is_resume", IS_RESUME_SCHEMA)
    }

    pub fn resume_profile() -> Result<Self, InferenceError> {
        Self::compile("resume_profile", RESUME_PROFILE_SCHEMA)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn validate(&self, instance: &Value) -> Result<(), InferenceError> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|e| e.to_string())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InferenceError::SchemaViolation {
                schema: self.name,
                errors: errors.join("; "),
            })
        }
    }

    /// Parses raw model content into `T`, failing closed on any mismatch.
    pub fn decode<T: DeserializeOwned>(&self, content: &str) -> Result<T, InferenceError> {
        let json = strip_json_fences(content);
        if json.is_empty() {
            return Err(InferenceError::EmptyContent);
        }

        let value: Value = serde_json::from_str(json)
            .map_err(|e| InferenceError::MalformedJson(e.to_string()))?;

        self.validate(&value)?;

        serde_json::from_value(value).map_err(|e| InferenceError::MalformedJson(e.to_string()))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
