//! obsidian-tasks - checkbox tasks across a vault of markdown notes
//!
//! Scans notes for `- [ ]` style task lines, filters them by status and
//! priority, scopes them to daily notes, and appends new tasks.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{DateScope, FilterConfig, TaskRecord, TaskStatus};
pub use storage::{Config, ScanRoot, Vault, VaultError};
