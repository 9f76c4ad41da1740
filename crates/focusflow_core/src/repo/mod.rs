//! Persistence gateway abstractions and implementations.
//!
//! # Responsibility
//! - Define the board load/save contract consumed by the service layer.
//! - Isolate SQLite and document-encoding details from business logic.
//!
//! # Invariants
//! - Gateway APIs return semantic errors (`InvalidData`) in addition to DB
//!   transport errors.

pub mod board_repo;
