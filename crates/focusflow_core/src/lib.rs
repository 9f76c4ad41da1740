//! Core task-board engine for FocusFlow.
//! This crate is the single source of truth for board invariants: the task
//! record model, the column-transition logic, and the search/filter
//! projection consumed by presentation layers.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use codec::portable::{export_board, import_board, CodecResult, FormatError, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Column, Priority, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError,
};
pub use query::board_view::{project, BoardQuery, BoardView, ColumnCounts, PriorityFilter};
pub use repo::board_repo::{BoardRepository, RepoError, RepoResult, SqliteBoardRepository};
pub use service::board_service::{BoardError, BoardResult, BoardService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
