//! Task filtering and selection
//!
//! Selection concatenates scan results in root order, then applies the
//! status and priority predicates. Scan order is kept as-is; nothing is
//! re-sorted.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use chrono::NaiveDate;

use super::task::{TaskRecord, TaskStatus};

/// Date window for calendar-based queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// The daily note for this date plus notes linking to it
    On(NaiveDate),
    /// Every earlier daily note plus notes linking to any of them
    Before(NaiveDate),
}

/// Which tasks to keep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Statuses to keep; empty keeps every status
    pub statuses: BTreeSet<TaskStatus>,

    /// Keep only `- [ ] ! ` style priority tasks
    pub priority_only: bool,

    /// Calendar scope; aggregated results are de-duplicated by file and line
    pub date_scope: Option<DateScope>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_priority_only(mut self, priority_only: bool) -> Self {
        self.priority_only = priority_only;
        self
    }

    pub fn with_date_scope(mut self, scope: DateScope) -> Self {
        self.date_scope = Some(scope);
        self
    }

    /// Returns true if the record passes the status and priority predicates
    pub fn matches(&self, record: &TaskRecord) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&record.status()) {
            return false;
        }

        !self.priority_only || record.is_priority()
    }
}

/// Assembles the final task list from per-root scan results.
pub fn select<R, I>(roots: R, filter: &FilterConfig) -> Vec<TaskRecord>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = TaskRecord>,
{
    let mut seen: HashSet<(PathBuf, usize)> = HashSet::new();
    let dedup = filter.date_scope.is_some();
    let mut selected = Vec::new();

    for record in roots.into_iter().flatten() {
        if dedup {
            let (file, line) = record.location();
            if !seen.insert((file.to_path_buf(), line)) {
                log::debug!("Skipping duplicate {}:{}", file.display(), line);
                continue;
            }
        }

        if filter.matches(&record) {
            selected.push(record);
        }
    }

    log::debug!("Selected {} task(s)", selected.len());
    selected
}
