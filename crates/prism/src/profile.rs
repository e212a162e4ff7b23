//! Data contracts for extracted resume profiles.
//!
//! Every scalar is optional: `None` means "not found in the source text",
//! never an error. List containers are always present and may be empty.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of skills kept on a profile.
pub const MAX_TOP_SKILLS: usize = 5;

/// Maximum number of projects/publications kept on a profile.
pub const MAX_PROJECTS: usize = 3;

/// Strings models emit when they mean "absent".
const PLACEHOLDERS: &[&str] = &[
    "null",
    "none",
    "n/a",
    "na",
    "not found",
    "not mentioned",
    "not provided",
    "not available",
    "unknown",
];

/// Verdict of the resume classification step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsResumeVerdict {
    pub is_resume: bool,
    /// Always populated. Surfaced to the operator when `is_resume` is false.
    pub reason: String,
}

/// A single educational entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub graduation_date: Option<String>,
}

/// A single work experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The structured profile extracted from a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub name: Option<String>,
    /// Deduplication key.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Ordered, most prominent first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_three_projects_and_publications: Vec<String>,
}

/// Name/email pair returned by profile listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: Option<String>,
    pub email: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trims a value and maps blank or placeholder strings to `None`.
fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

fn clean_list(values: Vec<String>, cap: usize) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| clean(Some(v)))
        .take(cap)
        .collect()
}

/// Canonical form of an email used as a storage key: trimmed and lower-cased.
/// Returns `None` for blank input.
pub fn normalize_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl Education {
    fn normalized(self) -> Self {
        Self {
            institution: clean(self.institution),
            degree: clean(self.degree),
            field_of_study: clean(self.field_of_study),
            graduation_date: clean(self.graduation_date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.institution.is_none()
            && self.degree.is_none()
            && self.field_of_study.is_none()
            && self.graduation_date.is_none()
    }
}

impl WorkExperience {
    fn normalized(self) -> Self {
        Self {
            company: clean(self.company),
            job_title: clean(self.job_title),
            start_date: clean(self.start_date),
            end_date: clean(self.end_date),
            description: clean(self.description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.job_title.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_none()
    }
}

impl ResumeProfile {
    /// Cleans model output: trims strings, turns placeholders into absence,
    /// drops empty sub-entities and applies the list caps.
    pub fn normalized(self) -> Self {
        Self {
            name: clean(self.name),
            email: clean(self.email),
            phone_number: clean(self.phone_number),
            linkedin_url: clean(self.linkedin_url),
            github_url: clean(self.github_url),
            portfolio_url: clean(self.portfolio_url),
            summary: clean(self.summary),
            top_skills: clean_list(self.top_skills, MAX_TOP_SKILLS),
            education: self
                .education
                .into_iter()
                .map(Education::normalized)
                .filter(|e| !e.is_empty())
                .collect(),
            work_experience: self
                .work_experience
                .into_iter()
                .map(WorkExperience::normalized)
                .filter(|w| !w.is_empty())
                .collect(),
            latest_three_projects_and_publications: clean_list(
                self.latest_three_projects_and_publications,
                MAX_PROJECTS,
            ),
        }
    }

    /// The email to deduplicate on, if one was extracted.
    pub fn email_key(&self) -> Option<String> {
        self.email.as_deref().and_then(normalize_email)
    }
}
