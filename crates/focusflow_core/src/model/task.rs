//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its closed enum fields.
//! - Normalize raw field input (trimming, enum defaulting) at creation.
//! - Apply partial updates with merge-if-present semantics.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never empty after any constructor or mutation.
//! - `priority` and `column` are always one of their closed variants.
//! - `id` and `created_at` never change after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every task on the board.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task urgency level.
///
/// Unrecognized raw input is folded to [`Priority::Low`] rather than
/// rejected, so imports from older or hand-edited documents stay usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Default when unset or unrecognized.
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parses a wire value, returning `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Normalizes raw input to a valid priority, defaulting to `Low`.
    pub fn normalize(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Stable lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Lifecycle column a task lives in.
///
/// Every task is always in exactly one column; there is no "unfiled" state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Default at creation.
    #[default]
    Today,
    Week,
    Done,
}

impl Column {
    /// Parses a wire value, returning `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Normalizes raw input to a valid column, defaulting to `Today`.
    pub fn normalize(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Next column in the today -> week -> done -> today cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Today => Self::Week,
            Self::Week => Self::Done,
            Self::Done => Self::Today,
        }
    }

    /// Stable lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Done => "done",
        }
    }
}

/// Validation failure raised by task constructors and mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title trimmed to an empty string.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// The serialized shape (field names, lowercase enum values, `null` for a
/// missing due date) doubles as both the persistence document entry and the
/// portable export/import entry, so round trips are lossless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for lookups, moves and deletion.
    pub id: TaskId,
    /// Never empty after trimming.
    pub title: String,
    /// Free-text grouping label; empty means uncategorized.
    #[serde(default)]
    pub category: String,
    /// Free-text details; empty means none.
    #[serde(default)]
    pub desc: String,
    /// ISO calendar date as entered; `None` is the explicit no-due-date
    /// marker (never an empty string, to keep comparisons unambiguous).
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub column: Column,
    /// Creation time in epoch milliseconds. Drives newest-first ordering.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Raw creation fields as captured from the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub category: String,
    pub desc: String,
    pub due: Option<String>,
    pub priority: Priority,
}

/// Explicit partial update, one slot per mutable attribute.
///
/// `None` means "leave the field alone". For `due`, the inner option
/// distinguishes setting a date (`Some(Some(date))`) from clearing it
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub desc: Option<String>,
    pub due: Option<Option<String>>,
    pub priority: Option<Priority>,
}

impl Task {
    /// Builds a new task from raw draft fields.
    ///
    /// # Contract
    /// - Trims `title`, `category` and `desc` before storage.
    /// - Rejects a title that trims to empty; no partial record is produced.
    /// - Assigns a fresh `id` and `created_at`, and starts in `Column::Today`.
    pub fn new(draft: TaskDraft) -> Result<Self, TaskValidationError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            category: draft.category.trim().to_string(),
            desc: draft.desc.trim().to_string(),
            due: normalize_due(draft.due),
            priority: draft.priority,
            column: Column::default(),
            created_at: now_epoch_ms(),
        })
    }

    /// Merges a partial update into this task.
    ///
    /// # Contract
    /// - A patch title that trims to empty is ignored and the prior title
    ///   retained; the remaining patch fields still apply.
    /// - `id`, `created_at` and `column` are never touched (column changes
    ///   go through move operations only).
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if !title.is_empty() {
                self.title = title;
            }
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(desc) = patch.desc {
            self.desc = desc.trim().to_string();
        }
        if let Some(due) = patch.due {
            self.due = normalize_due(due);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Folds blank due-date input into the explicit no-due-date marker.
pub fn normalize_due(raw: Option<String>) -> Option<String> {
    raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Current time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
