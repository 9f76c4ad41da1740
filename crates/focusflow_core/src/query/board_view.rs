//! Pure query projection over board snapshots.
//!
//! # Responsibility
//! - Derive the filtered, searched, column-partitioned view consumed by
//!   presentation.
//! - Keep result shaping deterministic and side-effect free.
//!
//! # Invariants
//! - Input order (newest-first, as maintained by the store) is preserved
//!   within every column.
//! - Projection never mutates the snapshot.

use crate::model::task::{Column, Priority, Task};

/// Priority predicate: everything, or one exact level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Normalizes raw filter input; `"all"` and anything unrecognized both
    /// mean no filtering.
    pub fn parse(value: &str) -> Self {
        match Priority::parse(value) {
            Some(priority) => Self::Only(priority),
            None => Self::All,
        }
    }

    fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == priority,
        }
    }
}

/// Search and filter inputs for one projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    /// Free text matched case-insensitively against title, category and
    /// description. Empty matches everything.
    pub search: String,
    pub priority: PriorityFilter,
}

impl BoardQuery {
    /// Query that shows the whole board.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(priority: Priority) -> Self {
        Self {
            priority: PriorityFilter::Only(priority),
            ..Self::default()
        }
    }
}

/// Per-column sizes of the visible set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnCounts {
    pub today: usize,
    pub week: usize,
    pub done: usize,
}

impl ColumnCounts {
    pub fn total(self) -> usize {
        self.today + self.week + self.done
    }
}

/// The partitioned view: one ordered sequence per lifecycle column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub today: Vec<Task>,
    pub week: Vec<Task>,
    pub done: Vec<Task>,
}

impl BoardView {
    pub fn counts(&self) -> ColumnCounts {
        ColumnCounts {
            today: self.today.len(),
            week: self.week.len(),
            done: self.done.len(),
        }
    }

    /// Size of the whole visible set across columns.
    pub fn visible_len(&self) -> usize {
        self.counts().total()
    }
}

/// Projects a snapshot into the partitioned view.
///
/// A task is visible when the lowercased search text is a substring of its
/// title, category or description (absent fields behave as empty strings)
/// AND its priority passes the filter.
pub fn project(tasks: &[Task], query: &BoardQuery) -> BoardView {
    let needle = query.search.to_lowercase();
    let mut view = BoardView::default();

    for task in tasks {
        if !matches_text(task, &needle) || !query.priority.matches(task.priority) {
            continue;
        }

        let bucket = match task.column {
            Column::Today => &mut view.today,
            Column::Week => &mut view.week,
            Column::Done => &mut view.done,
        };
        bucket.push(task.clone());
    }

    view
}

fn matches_text(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    task.title.to_lowercase().contains(needle)
        || task.category.to_lowercase().contains(needle)
        || task.desc.to_lowercase().contains(needle)
}
