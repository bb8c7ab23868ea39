//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Scans | Notes |
//! |---------|-------|-------|
//! | `inbox` | inbox folder or note | `--path` overrides the configured inbox |
//! | `list` | given paths, or the vault | missing paths are reported, others still print |
//! | `today` | today's daily note + backlinks | `--date` picks another day |
//! | `overdue` | earlier daily notes + backlinks | open tasks unless `--status` is given |
//! | `add` | - | appends `- [ ] text` to a note |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - one task body per line, optionally colored
//! - `json` - array of `{file, line_number, text}` objects
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod list;
mod add;

pub use app::{Cli, Commands, FilterArgs, run};
pub use output::{Output, OutputFormat};
