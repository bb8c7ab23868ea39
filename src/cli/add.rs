//! Add command

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use super::output::Output;
use crate::storage::{task_line, Config, Vault};

/// Append `- [ ] <text>` to `note` (default: the inbox, see [`Config::add_target`])
pub fn run(output: &Output, config: &Config, note: Option<&str>, text: &str) -> Result<ExitCode> {
    let vault = Vault::open(config.require_vault()?).context("Cannot open vault")?;
    let line = task_line(text)?;

    let note = match note {
        Some(note) => PathBuf::from(note.trim()),
        None => config.add_target()?,
    };
    log::debug!("Add target: {}", note.display());

    let path = vault
        .append_task(&note, text)
        .with_context(|| format!("Failed to add task to '{}'", note.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": path.display().to_string(),
            "text": line.trim_start_matches("- "),
        }));
    } else {
        output.line(&path.display().to_string());
    }

    Ok(ExitCode::SUCCESS)
}
