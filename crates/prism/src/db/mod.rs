//! Profile persistence: the [`ProfileStore`] contract and its SQLite
//! implementation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;

use crate::profile::{ProfileSummary, ResumeProfile};

pub mod error;
pub mod migrations;
pub mod profile_repo;

pub use error::DatabaseError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Persistence contract the pipeline depends on.
///
/// Lookups are keyed by email and compare normalized keys, so the store must
/// write keys in the same normalized form. `insert` never upserts.
pub trait ProfileStore: Send + Sync {
    /// Returns the stored profile for `email`, or `None` when no record exists.
    fn exists(&self, email: &str) -> Result<Option<ResumeProfile>, DatabaseError>;

    fn insert(&self, profile: &ResumeProfile) -> Result<(), DatabaseError>;

    /// Name and email of every stored profile, in insertion order.
    fn list_all(&self) -> Result<Vec<ProfileSummary>, DatabaseError>;
}

/// SQLite-backed profile store.
///
/// Clones share one connection. Every call takes the lock for its own
/// duration only; nothing holds it across pipeline steps.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens or creates the database file, creating parent directories as
    /// needed, and brings the schema up to date.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| DatabaseError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("SQLite journal mode: {}", mode);
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let db = Self::from_connection(conn)?;
        log::info!("Profile store ready at {}", path.display());
        Ok(db)
    }

    /// Private in-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with the connection locked.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let guard = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&guard)
    }
}

impl ProfileStore for Database {
    fn exists(&self, email: &str) -> Result<Option<ResumeProfile>, DatabaseError> {
        profile_repo::find_by_email(self, email)
    }

    fn insert(&self, profile: &ResumeProfile) -> Result<(), DatabaseError> {
        let id = profile_repo::insert(self, profile)?;
        log::debug!("Inserted profile row {}", id);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ProfileSummary>, DatabaseError> {
        profile_repo::list_all(self)
    }
}

/// Returns the canonical database path: `~/.prism/data/prism.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".prism").join("data").join("prism.db"))
}
