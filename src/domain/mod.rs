//! Domain models for obsidian-tasks
//!
//! Contains task recognition, filtering and rendering without any I/O concerns.

pub mod line;
mod task;
mod filter;
mod render;

pub use task::{TaskRecord, TaskStatus};
pub use filter::{select, DateScope, FilterConfig};
pub use render::{display_line, TaskJson};
