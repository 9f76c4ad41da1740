//! Portable board document codec.
//!
//! # Responsibility
//! - Serialize the full task collection to a human-readable JSON array.
//! - Parse user-supplied documents back into normalized tasks.
//!
//! # Invariants
//! - Export/import round trips are lossless (ids, enums, the no-due-date
//!   marker, creation timestamps, ordering).
//! - Import never produces a partially-normalized collection: any entry
//!   failure aborts the whole parse.

use crate::model::task::{normalize_due, now_epoch_ms, Column, Priority, Task, TaskId};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Suggested file name for exported board documents.
pub const EXPORT_FILE_NAME: &str = "focusflow-tasks.json";

pub type CodecResult<T> = Result<T, FormatError>;

/// Import/export document failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input is not valid JSON at all.
    Parse(String),
    /// Input parsed but the top level is not an array.
    NotASequence,
    /// One entry is not a usable task record.
    Entry { index: usize, message: String },
    /// Collection could not be serialized (not expected in practice).
    Encode(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "document is not valid JSON: {message}"),
            Self::NotASequence => write!(f, "document must be a JSON array of task records"),
            Self::Entry { index, message } => {
                write!(f, "entry {index} is not a valid task record: {message}")
            }
            Self::Encode(message) => write!(f, "board could not be serialized: {message}"),
        }
    }
}

impl Error for FormatError {}

/// Serializes the collection as pretty-printed UTF-8 JSON.
pub fn export_board(tasks: &[Task]) -> CodecResult<String> {
    serde_json::to_string_pretty(tasks).map_err(|err| FormatError::Encode(err.to_string()))
}

/// Parses and normalizes a portable document into a task collection.
///
/// # Contract
/// - The top level must be a JSON array, otherwise the import is rejected
///   without producing any tasks.
/// - Each entry needs a non-blank `title`; missing or unrecognized
///   `priority`/`column` values default (`low` / `today`) instead of
///   rejecting the document, so hand-edited files stay importable.
/// - Missing `id`/`createdAt` are backfilled; duplicate ids are rejected
///   because id uniqueness is a hard board invariant.
/// - Document order is preserved.
pub fn import_board(text: &str) -> CodecResult<Vec<Task>> {
    let document: Value =
        serde_json::from_str(text).map_err(|err| FormatError::Parse(err.to_string()))?;

    let Value::Array(entries) = document else {
        return Err(FormatError::NotASequence);
    };

    let mut tasks = Vec::with_capacity(entries.len());
    let mut seen_ids: HashSet<TaskId> = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let task = normalize_entry(entry).map_err(|message| FormatError::Entry { index, message })?;
        if !seen_ids.insert(task.id) {
            return Err(FormatError::Entry {
                index,
                message: format!("duplicate task id `{}`", task.id),
            });
        }
        tasks.push(task);
    }

    Ok(tasks)
}

fn normalize_entry(entry: &Value) -> Result<Task, String> {
    let record = entry.as_object().ok_or("not a JSON object")?;

    let title = record
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or("missing `title`")?;
    if title.is_empty() {
        return Err("`title` is blank".to_string());
    }

    let id = match record.get("id").and_then(Value::as_str) {
        Some(raw) => Uuid::parse_str(raw).map_err(|_| format!("invalid task id `{raw}`"))?,
        None => Uuid::new_v4(),
    };

    let priority = record
        .get("priority")
        .and_then(Value::as_str)
        .map_or_else(Priority::default, Priority::normalize);
    let column = record
        .get("column")
        .and_then(Value::as_str)
        .map_or_else(Column::default, Column::normalize);

    Ok(Task {
        id,
        title: title.to_string(),
        category: text_field(record.get("category")),
        desc: text_field(record.get("desc")),
        due: normalize_due(record.get("due").and_then(Value::as_str).map(str::to_string)),
        priority,
        column,
        created_at: record
            .get("createdAt")
            .and_then(Value::as_i64)
            .unwrap_or_else(now_epoch_ms),
    })
}

fn text_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
