//! Blocking client for OpenAI-compatible `/chat/completions` endpoints.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::prompts;
use super::validate::StructuredSchema;
use super::{InferenceClient, InferenceError};
use crate::config::{InferenceConfig, ResponseFormat};
use crate::profile::{IsResumeVerdict, ResumeProfile};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Lowest sampling temperature; keeps both tasks as repeatable as the
/// provider allows.
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    response_format: Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct ChatCompletionsClient {
    http: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    response_format: ResponseFormat,
    api_key: SecretString,
    verdict_schema: StructuredSchema,
    profile_schema: StructuredSchema,
}

impl ChatCompletionsClient {
    pub fn new(config: &InferenceConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| InferenceError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            response_format: config.response_format,
            api_key,
            verdict_schema: StructuredSchema::is_resume()?,
            profile_schema: StructuredSchema::resume_profile()?,
        })
    }

    /// Sends one chat completion and returns the raw message content.
    fn complete(
        &self,
        schema: &StructuredSchema,
        user_prompt: String,
    ) -> Result<String, InferenceError> {
        let request = build_request(
            &self.model,
            self.max_tokens,
            self.response_format,
            schema,
            user_prompt,
        );

        let started = Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        debug!(
            schema = schema.name(),
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chat completion returned"
        );

        parse_completion(status, &body)
    }
}

impl InferenceClient for ChatCompletionsClient {
    fn classify(&self, text: &str) -> Result<IsResumeVerdict, InferenceError> {
        let content = self.complete(&self.verdict_schema, prompts::classify_prompt(text))?;
        self.verdict_schema.decode(&content)
    }

    fn extract(&self, text: &str) -> Result<ResumeProfile, InferenceError> {
        let content = self.complete(&self.profile_schema, prompts::extract_prompt(text))?;
        let profile: ResumeProfile = self.profile_schema.decode(&content)?;
        Ok(profile.normalized())
    }
}

fn build_request<'a>(
    model: &'a str,
    max_tokens: u32,
    format: ResponseFormat,
    schema: &StructuredSchema,
    user_prompt: String,
) -> ChatRequest<'a> {
    let response_format = match format {
        ResponseFormat::JsonObject => json!({ "type": "json_object" }),
        ResponseFormat::JsonSchema => json!({
            "type": "json_schema",
            "json_schema": {
                "name": schema.name(),
                "schema": schema.raw(),
                "strict": false,
            }
        }),
    };

    ChatRequest {
        model,
        temperature: TEMPERATURE,
        max_tokens,
        messages: vec![
            ChatMessage {
                role: "system",
                content: prompts::system_prompt(schema.raw()),
            },
            ChatMessage {
                role: "user",
                content: user_prompt,
            },
        ],
        response_format,
    }
}

/// Maps an HTTP status and body to the first choice's message content.
fn parse_completion(status: u16, body: &str) -> Result<String, InferenceError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(InferenceError::Api { status, message });
    }

    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| InferenceError::MalformedJson(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(InferenceError::EmptyContent)
}
