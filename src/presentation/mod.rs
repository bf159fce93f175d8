//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Output formatting for the terminal (sizes, aligned tables, JSON)
//!
//! ## Structure
//!
//! - `factory` - Opens the shelf and builds use cases (dependency injection)
//! - `format` - Human-readable sizes and the `list` table

pub mod factory;
pub mod format;

pub use factory::Shelf;
pub use format::{format_size, render_projects};
