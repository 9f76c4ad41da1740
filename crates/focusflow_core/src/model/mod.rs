//! Domain model for the task board.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep enum-like fields as closed variants so invalid states are
//!   unrepresentable.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Every task is always in exactly one lifecycle column.

pub mod task;
