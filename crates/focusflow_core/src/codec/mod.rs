//! Portable document encoding for board export/import.
//!
//! # Responsibility
//! - Own the external JSON document shape and its validation policy.
//! - Keep normalization of foreign documents inside core.

pub mod portable;
