//! Listing commands (inbox, list, today, overdue)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use super::output::Output;
use crate::domain::{display_line, DateScope, FilterConfig, TaskJson, TaskStatus};
use crate::storage::{query, query_calendar, Config, QueryResult, ScanRoot, Vault};

/// List tasks in the inbox folder or note
pub fn inbox(
    output: &Output,
    config: &Config,
    path: Option<PathBuf>,
    filter: &FilterConfig,
) -> Result<ExitCode> {
    let root = match path {
        Some(path) => path,
        None => config.inbox().context("Cannot locate the inbox")?,
    };
    log::debug!("Inbox: {}", root.display());

    let result = query(&[ScanRoot::new(root)], filter);
    Ok(report(output, config, &result))
}

/// List tasks under the given roots, or the whole vault
pub fn list(
    output: &Output,
    config: &Config,
    paths: Vec<PathBuf>,
    filter: &FilterConfig,
) -> Result<ExitCode> {
    let roots: Vec<ScanRoot> = if paths.is_empty() {
        vec![ScanRoot::new(config.require_vault()?)]
    } else {
        paths.into_iter().map(ScanRoot::new).collect()
    };

    let result = query(&roots, filter);
    Ok(report(output, config, &result))
}

/// List tasks in the daily note for `date` (default today) and its backlinks
pub fn today(
    output: &Output,
    config: &Config,
    date: Option<NaiveDate>,
    filter: &FilterConfig,
) -> Result<ExitCode> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    calendar_report(output, config, DateScope::On(date), filter)
}

/// List tasks from daily notes before `date` (default today) and their backlinks.
///
/// Without a status filter only open tasks are shown.
pub fn overdue(
    output: &Output,
    config: &Config,
    date: Option<NaiveDate>,
    filter: &FilterConfig,
) -> Result<ExitCode> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let filter = if filter.statuses.is_empty() {
        filter.clone().with_statuses([TaskStatus::Open])
    } else {
        filter.clone()
    };

    calendar_report(output, config, DateScope::Before(date), &filter)
}

fn calendar_report(
    output: &Output,
    config: &Config,
    scope: DateScope,
    filter: &FilterConfig,
) -> Result<ExitCode> {
    let vault = Vault::open(config.require_vault()?).context("Cannot open vault")?;
    let calendar = vault.calendar(config.calendar_dir.as_deref());
    log::debug!("Calendar directory: {}", calendar.dir().display());

    let result = query_calendar(&calendar, scope, filter)?;
    Ok(report(output, config, &result))
}

/// Prints tasks, warnings and per-root errors; fails if any root failed
fn report(output: &Output, config: &Config, result: &QueryResult) -> ExitCode {
    for warning in &result.warnings {
        output.warning(&warning.to_string());
    }

    if output.is_json() {
        let items: Vec<TaskJson> = result.tasks.iter().map(TaskJson::from).collect();
        output.data(&items);
    } else {
        for task in &result.tasks {
            output.line(&display_line(task, config.color));
        }
    }

    for error in &result.errors {
        output.error(&error.to_string());
    }

    if result.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
