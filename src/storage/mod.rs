//! # Storage Layer
//!
//! Everything that touches the filesystem: reading notes, locating daily
//! notes, appending tasks and loading configuration.
//!
//! ## Vault Layout
//!
//! ```text
//! vault/
//! ├── Inbox.md              # default target for `ot add`
//! ├── Calendar/
//! │   ├── 2026-01-16.md     # daily notes, yyyy-mm-dd.md
//! │   └── 2026-01-17.md
//! └── Projects/
//!     └── site.md           # may link to a day with [[2026-01-17]]
//! ```
//!
//! ## Key Types
//!
//! - [`Vault`] - Note path resolution and task appends
//! - [`Scanner`] - Lazy iterator over the tasks of one [`ScanRoot`]
//! - [`Calendar`] - Daily note lookup and backlink scoping
//! - [`Config`] - Settings file + environment configuration
//!
//! ## Error Policy
//!
//! Unreadable files are skipped and reported as [`ScanWarning`]s. A missing
//! root fails only its own scan; [`query`] keeps going with the others.

mod calendar;
mod config;
mod query;
mod scanner;
mod vault;

pub use calendar::{
    backlink_token, contains_backlink, daily_note_date, daily_note_name, Calendar, ScopedRoots,
};
pub use config::{Config, ConfigError, Settings};
pub use query::{query, query_calendar, QueryResult};
pub use scanner::{
    is_note_file, note_files, scan, scan_file, ScanRoot, ScanWarning, Scanner, NOTE_EXTENSION,
};
pub use vault::{task_line, Vault, VaultError};
