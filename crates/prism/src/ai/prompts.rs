//! Prompt builders for the two inference tasks.

use crate::processor::pdf::HYPERLINK_TRAILER_HEADER;

/// Sanitizes text for safe inclusion in LLM prompts.
///
/// Escapes chat-template control tokens so document text cannot open or
/// close a turn:
/// - `<|...|>` ChatML special tokens
/// - `<s>`, `</s>` sequence boundaries
/// - `[INST]`, `[/INST]` Llama instruction markers
/// - `<<SYS>>`, `<</SYS>>` Llama system prompt markers
pub fn sanitize_for_prompt(text: &str) -> String {
    text.replace("<|", "< |")
        .replace("|>", "| >")
        .replace("<s>", "< s >")
        .replace("</s>", "< / s >")
        .replace("[INST]", "[ INST ]")
        .replace("[/INST]", "[ / INST ]")
        .replace("<<SYS>>", "< < SYS > >")
        .replace("<</SYS>>", "< < / SYS > >")
}

/// System message pinning the response to a JSON Schema.
pub fn system_prompt(schema: &serde_json::Value) -> String {
    format!(
        "You are a precise document analysis assistant. \
         Respond with a single JSON object that conforms to this JSON Schema and nothing else:\n{}",
        schema
    )
}

pub fn classify_prompt(text: &str) -> String {
    format!(
        "Analyze the text to determine if it is a resume or CV.\n\nText:\n---\n{}",
        sanitize_for_prompt(text)
    )
}

pub fn extract_prompt(text: &str) -> String {
    format!(
        r#"Analyze the resume text provided below to extract a comprehensive, structured profile.
The text may contain a special section at the end called '{header}'.
Use the URLs from that section to accurately fill in the linkedin_url, github_url, and portfolio_url fields.
If a specific field is not mentioned anywhere, set its value to null. Never use placeholder text.

Extraction requirements:
- name, email, phone_number: standard contact details.
- summary: a concise professional summary.
- top_skills: a list of the 5 most prominent skills, most prominent first.
- linkedin_url, github_url, portfolio_url: prefer the links listed in the '{header}' section.
- education: a detailed list of educational background.
- work_experience: a detailed list of work history.
- latest_three_projects_and_publications: a list of up to 3 projects or publications.

Resume text (including any detected links at the end):
---
{text}
---"#,
        header = HYPERLINK_TRAILER_HEADER,
        text = sanitize_for_prompt(text),
    )
}
