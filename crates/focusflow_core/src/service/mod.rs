//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, gateway and codec calls into the store API used by
//!   presentation layers.
//! - Keep UI layers decoupled from storage details.

pub mod board_service;
