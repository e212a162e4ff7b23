//! API key resolution.
//!
//! Sources are tried in priority order and the first configured one wins:
//!
//! 1. **Direct value** in the config file (`api_key`)
//! 2. **File reference** such as a mounted secret (`api_key_file`)
//! 3. **Environment variable** name (`api_key_env_var`, default `GROQ_API_KEY`)
//!
//! A configured source that fails to yield a value is an error; it does not
//! fall through to the next source.

use secrecy::SecretString;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("No API key source configured (need one of: api_key, api_key_file, api_key_env_var)")]
    NoSourceProvided,

    #[error("Failed to read API key from file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API key file '{path}' is empty")]
    EmptyFile { path: String },

    #[error("Environment variable '{name}' not set")]
    EnvVarNotSet { name: String },

    #[error("Environment variable '{name}' contains invalid UTF-8")]
    EnvVarNotUnicode { name: String },
}

enum Source<'a> {
    Direct(&'a str),
    File(&'a str),
    EnvVar(&'a str),
}

impl Source<'_> {
    fn read(&self) -> Result<SecretString, SecretError> {
        match *self {
            Source::Direct(value) => Ok(SecretString::from(value.to_string())),
            Source::File(path) => {
                let expanded = expand_home(path);
                let content =
                    std::fs::read_to_string(&expanded).map_err(|e| SecretError::FileReadError {
                        path: expanded.clone(),
                        source: e,
                    })?;
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    return Err(SecretError::EmptyFile { path: expanded });
                }
                Ok(SecretString::from(trimmed.to_string()))
            }
            Source::EnvVar(name) => match std::env::var(name) {
                Ok(value) => Ok(SecretString::from(value.trim().to_string())),
                Err(std::env::VarError::NotPresent) => Err(SecretError::EnvVarNotSet {
                    name: name.to_string(),
                }),
                Err(std::env::VarError::NotUnicode(_)) => Err(SecretError::EnvVarNotUnicode {
                    name: name.to_string(),
                }),
            },
        }
    }
}

/// Resolves a secret from the first non-empty source: direct value, file
/// contents, then environment variable. File and env values are trimmed.
pub fn resolve_secret(
    direct: Option<&str>,
    file_path: Option<&str>,
    env_var: Option<&str>,
) -> Result<SecretString, SecretError> {
    fn configured(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.is_empty())
    }

    let source = configured(direct)
        .map(Source::Direct)
        .or_else(|| configured(file_path).map(Source::File))
        .or_else(|| configured(env_var).map(Source::EnvVar))
        .ok_or(SecretError::NoSourceProvided)?;

    source.read()
}

/// Expands a leading `~` to the user's home directory.
///
/// Checks HOME then USERPROFILE. `~user/path` is not supported.
pub fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            let home = home.to_string_lossy();
            return format!("{}{}", home, &path[1..]);
        }
    }
    path.to_string()
}
