use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create database directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON list column could not be written or read back.
    #[error("Column '{column}' holds invalid JSON: {source}")]
    Serialization {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema migration {version} ({description}) failed: {source}")]
    Migration {
        version: u32,
        description: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A previous holder of the connection panicked.
    #[error("Profile store connection lock poisoned")]
    LockPoisoned,
}
