//! Board persistence gateway contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and save the full task collection as one JSON document.
//! - Keep SQL and document-encoding details inside the persistence boundary.
//!
//! # Invariants
//! - The collection lives under a single named slot; an absent slot reads
//!   back as an empty collection.
//! - Read paths reject corrupt persisted documents instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::Task;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot holding the serialized task collection.
pub const TASKS_SLOT: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Gateway error for board persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted document exists but cannot be decoded.
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Schema version matches but a required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted board document: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Gateway interface for loading/saving the full board.
///
/// The board service is generic over this trait so tests can inject an
/// in-memory database.
pub trait BoardRepository {
    /// Loads the full task collection; absent slot means empty board.
    fn load_board(&self) -> RepoResult<Vec<Task>>;
    /// Replaces the persisted collection with `tasks`.
    fn save_board(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed board gateway storing the collection in the `slots` table.
#[derive(Debug)]
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    /// Wraps a connection after verifying it has been fully migrated.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration version.
    /// - `MissingRequiredTable` when the `slots` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected = latest_version();
        let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual != expected {
            return Err(RepoError::UninitializedConnection {
                expected_version: expected,
                actual_version: actual,
            });
        }

        let slots_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if slots_exists != 1 {
            return Err(RepoError::MissingRequiredTable("slots"));
        }

        Ok(Self { conn })
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn load_board(&self) -> RepoResult<Vec<Task>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE name = ?1;",
                [TASKS_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text).map_err(|err| {
                RepoError::InvalidData(format!("slot `{TASKS_SLOT}` is not a task list: {err}"))
            }),
        }
    }

    fn save_board(&self, tasks: &[Task]) -> RepoResult<()> {
        let document = serde_json::to_string(tasks)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO slots (name, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TASKS_SLOT, document],
        )?;

        Ok(())
    }
}
