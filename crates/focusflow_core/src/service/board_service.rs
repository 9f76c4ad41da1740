//! Board service: the authoritative task store.
//!
//! # Responsibility
//! - Own the in-memory task collection; all mutation goes through here.
//! - Persist the full collection through the gateway on every mutation.
//!
//! # Invariants
//! - Task ids are unique across the collection at all times.
//! - Durable and in-memory state never diverge observably: the next
//!   collection is persisted first and swapped in only on success.
//! - Collection order is newest-first (creation prepends).

use crate::codec::portable::{export_board, import_board, FormatError};
use crate::model::task::{Column, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::query::board_view::{project, BoardQuery, BoardView};
use crate::repo::board_repo::{BoardRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Store-level error covering validation, lookup, persistence and import.
#[derive(Debug)]
pub enum BoardError {
    Validation(TaskValidationError),
    NotFound(TaskId),
    Repo(RepoError),
    Format(FormatError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for BoardError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<FormatError> for BoardError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

/// Exclusive owner of the task collection.
///
/// Mutations take `&mut self`, so the borrow checker rules out interleaved
/// writes; readers only ever see snapshots or projected views.
#[derive(Debug)]
pub struct BoardService<R: BoardRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: BoardRepository> BoardService<R> {
    /// Opens the board by loading the persisted collection.
    pub fn open(repo: R) -> BoardResult<Self> {
        let tasks = repo.load_board()?;
        Ok(Self { repo, tasks })
    }

    /// Creates a new task and prepends it to the collection.
    ///
    /// Newest-first ordering is a presentation convenience, not a
    /// correctness invariant. Fails with `Validation` when the title trims
    /// to empty; in that case nothing is created or persisted.
    pub fn create(&mut self, draft: TaskDraft) -> BoardResult<Task> {
        let task = Task::new(draft)?;

        let mut next = self.tasks.clone();
        next.insert(0, task.clone());
        self.commit(next)?;

        Ok(task)
    }

    /// Merges a partial update into the task with `id`.
    ///
    /// Unknown ids signal `NotFound` and leave state untouched. A patch
    /// title that trims to empty keeps the prior title while the remaining
    /// fields still apply.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> BoardResult<()> {
        let mut next = self.tasks.clone();
        let task = next
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(BoardError::NotFound(id))?;

        task.apply(patch);
        self.commit(next)
    }

    /// Removes the task with `id` if present.
    ///
    /// Returns whether anything was removed; deleting an absent id is a
    /// silent no-op, which makes the operation idempotent.
    pub fn delete(&mut self, id: TaskId) -> BoardResult<bool> {
        if !self.tasks.iter().any(|task| task.id == id) {
            return Ok(false);
        }

        let mut next = self.tasks.clone();
        next.retain(|task| task.id != id);
        self.commit(next)?;
        Ok(true)
    }

    /// Relocates the task with `id` to `column`.
    ///
    /// This is the state half of drag-and-drop; the gesture itself lives in
    /// presentation. Absent ids are a silent no-op (returns `false`).
    pub fn move_to(&mut self, id: TaskId, column: Column) -> BoardResult<bool> {
        let mut next = self.tasks.clone();
        let Some(task) = next.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };

        task.column = column;
        self.commit(next)?;
        Ok(true)
    }

    /// Cycles the task's column today -> week -> done -> today.
    ///
    /// Returns the new column, or `None` when the id is unknown.
    pub fn advance(&mut self, id: TaskId) -> BoardResult<Option<Column>> {
        let Some(current) = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.column)
        else {
            return Ok(None);
        };

        let target = current.next();
        self.move_to(id, target)?;
        Ok(Some(target))
    }

    /// Atomically swaps in a whole new collection (used by import).
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> BoardResult<()> {
        self.commit(tasks)
    }

    /// Irreversibly wipes the board.
    ///
    /// Callers must obtain explicit user confirmation before invoking this;
    /// the store itself performs the wipe unguarded.
    pub fn clear_all(&mut self) -> BoardResult<()> {
        self.commit(Vec::new())
    }

    /// Returns an independent copy of the collection for read-only use.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Projects the current collection through the query engine.
    pub fn view(&self, query: &BoardQuery) -> BoardView {
        project(&self.tasks, query)
    }

    /// Serializes the full collection as a portable pretty-printed document.
    pub fn export_all(&self) -> BoardResult<String> {
        Ok(export_board(&self.tasks)?)
    }

    /// Parses a portable document and replaces the whole collection.
    ///
    /// Returns the number of imported tasks. Any parse or entry failure
    /// aborts before `replace_all`, leaving the existing collection
    /// completely untouched.
    pub fn import_all(&mut self, document: &str) -> BoardResult<usize> {
        let tasks = import_board(document)?;
        let count = tasks.len();
        self.replace_all(tasks)?;
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Persists `next` and only then makes it the live collection.
    fn commit(&mut self, next: Vec<Task>) -> BoardResult<()> {
        self.repo.save_board(&next)?;
        self.tasks = next;
        Ok(())
    }
}
