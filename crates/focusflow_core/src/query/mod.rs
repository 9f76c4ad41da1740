//! Read-side query entry points.
//!
//! # Responsibility
//! - Expose the pure projection from snapshot + query to the rendered view.
//! - Keep filtering/partitioning logic inside core, out of presentation.

pub mod board_view;
