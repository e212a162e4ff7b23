//! Profile repository: reads and writes for the `profiles` table.
//!
//! Scalar fields map to nullable TEXT columns. List fields are stored as JSON
//! text so they round-trip losslessly.

use rusqlite::{params, Connection, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Database, DatabaseError};
use crate::profile::{normalize_email, ProfileSummary, ResumeProfile};

/// A raw profile row from the database.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub summary: Option<String>,
    pub top_skills: String,
    pub education: String,
    pub work_experience: String,
    pub projects_and_publications: String,
    pub created_at: String,
}

impl ProfileRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            name: row.get("name")?,
            phone_number: row.get("phone_number")?,
            linkedin_url: row.get("linkedin_url")?,
            github_url: row.get("github_url")?,
            portfolio_url: row.get("portfolio_url")?,
            summary: row.get("summary")?,
            top_skills: row.get("top_skills")?,
            education: row.get("education")?,
            work_experience: row.get("work_experience")?,
            projects_and_publications: row.get("projects_and_publications")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn into_profile(self) -> Result<ResumeProfile, DatabaseError> {
        Ok(ResumeProfile {
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            linkedin_url: self.linkedin_url,
            github_url: self.github_url,
            portfolio_url: self.portfolio_url,
            summary: self.summary,
            top_skills: decode("top_skills", &self.top_skills)?,
            education: decode("education", &self.education)?,
            work_experience: decode("work_experience", &self.work_experience)?,
            latest_three_projects_and_publications: decode(
                "projects_and_publications",
                &self.projects_and_publications,
            )?,
        })
    }
}

fn encode<T: Serialize>(column: &'static str, value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|source| DatabaseError::Serialization { column, source })
}

fn decode<T: DeserializeOwned>(column: &'static str, raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(raw).map_err(|source| DatabaseError::Serialization { column, source })
}

fn first_profile(
    conn: &Connection,
    sql: &str,
    param: &str,
) -> Result<Option<ResumeProfile>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query_map(params![param], ProfileRow::from_row)?;
    match rows.next() {
        Some(Ok(row)) => Ok(Some(row.into_profile()?)),
        Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
        None => Ok(None),
    }
}

/// Inserts a profile and returns its row id.
///
/// The email is stored in its normalized form so lookups are case-insensitive.
/// No uniqueness check happens here.
pub fn insert(db: &Database, profile: &ResumeProfile) -> Result<i64, DatabaseError> {
    let email = profile.email_key();
    let top_skills = encode("top_skills", &profile.top_skills)?;
    let education = encode("education", &profile.education)?;
    let work_experience = encode("work_experience", &profile.work_experience)?;
    let projects = encode(
        "projects_and_publications",
        &profile.latest_three_projects_and_publications,
    )?;
    let created_at = chrono::Utc::now().to_rfc3339();

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO profiles (email, name, phone_number, linkedin_url, github_url,
             portfolio_url, summary, top_skills, education, work_experience,
             projects_and_publications, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                email,
                profile.name,
                profile.phone_number,
                profile.linkedin_url,
                profile.github_url,
                profile.portfolio_url,
                profile.summary,
                top_skills,
                education,
                work_experience,
                projects,
                created_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Finds the earliest profile stored under the given email.
pub fn find_by_email(db: &Database, email: &str) -> Result<Option<ResumeProfile>, DatabaseError> {
    let Some(key) = normalize_email(email) else {
        return Ok(None);
    };

    db.with_conn(|conn| {
        first_profile(
            conn,
            "SELECT * FROM profiles WHERE email = ?1 ORDER BY id LIMIT 1",
            &key,
        )
    })
}

/// Finds the earliest profile whose name contains `name`, ignoring ASCII case.
pub fn search_by_name(db: &Database, name: &str) -> Result<Option<ResumeProfile>, DatabaseError> {
    let needle = name.trim();
    if needle.is_empty() {
        return Ok(None);
    }
    let pattern = format!("%{}%", escape_like(needle));

    db.with_conn(|conn| {
        first_profile(
            conn,
            "SELECT * FROM profiles WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id LIMIT 1",
            &pattern,
        )
    })
}

/// Lists name/email for every stored profile in insertion order.
pub fn list_all(db: &Database) -> Result<Vec<ProfileSummary>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT name, email FROM profiles ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ProfileSummary {
                    name: row.get(0)?,
                    email: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Counts stored profiles.
pub fn count(db: &Database) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |r| r.get(0))?;
        Ok(count as u64)
    })
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
