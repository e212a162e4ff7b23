//! Helpers for sanitizing data before it enters tracing span attributes.
//!
//! Log output may be shared for debugging, so candidate contact details and
//! full file paths never go into span fields verbatim.

use std::path::Path;

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Masks the local part of an email, keeping its first character and the domain.
///
/// - `jane@x.com` → `j***@x.com`
/// - `not-an-email` → `***`
pub fn redact_email(email: &str) -> String {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
