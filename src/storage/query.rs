//! Multi-root task queries
//!
//! Runs the scan → select pipeline over several roots. A root that fails
//! (e.g. does not exist) is reported without stopping the others.

use super::calendar::Calendar;
use super::scanner::{scan, ScanRoot, ScanWarning};
use super::vault::VaultError;
use crate::domain::{select, DateScope, FilterConfig, TaskRecord};

/// Outcome of a query
#[derive(Debug, Default)]
pub struct QueryResult {
    /// Selected tasks in scan order
    pub tasks: Vec<TaskRecord>,

    /// Files skipped because they could not be read
    pub warnings: Vec<ScanWarning>,

    /// Roots that could not be scanned at all
    pub errors: Vec<VaultError>,
}

impl QueryResult {
    /// Returns true if every root was scanned
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scans `roots` in order and selects tasks matching `filter`
pub fn query(roots: &[ScanRoot], filter: &FilterConfig) -> QueryResult {
    let mut result = QueryResult::default();
    let mut scanners = Vec::with_capacity(roots.len());

    for root in roots {
        match scan(root) {
            Ok(scanner) => scanners.push(scanner),
            Err(e) => {
                log::debug!("Root {} failed: {}", root.path().display(), e);
                result.errors.push(e);
            }
        }
    }

    result.tasks = select(scanners.iter_mut(), filter);
    for scanner in &mut scanners {
        result.warnings.extend(scanner.take_warnings());
    }

    result
}

/// Runs a calendar query over the notes selected by `scope`.
///
/// The scope replaces any scope already set on `filter`.
pub fn query_calendar(
    calendar: &Calendar,
    scope: DateScope,
    filter: &FilterConfig,
) -> Result<QueryResult, VaultError> {
    let filter = FilterConfig {
        date_scope: Some(scope),
        ..filter.clone()
    };

    let mut scoped = calendar.scope_roots(scope)?;
    let mut result = query(&scoped.roots, &filter);
    scoped.warnings.append(&mut result.warnings);
    result.warnings = scoped.warnings;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn bodies(result: &QueryResult) -> Vec<&str> {
        result.tasks.iter().map(|t| t.body()).collect()
    }

    #[test]
    fn scans_fixture_vault() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "- [ ] foo\n- [x] bar\n");
        write(dir.path(), "b.md", "* [ ] baz\n");
        let roots = [ScanRoot::new(dir.path())];

        let all = query(&roots, &FilterConfig::new());
        assert_eq!(bodies(&all), vec!["[ ] foo", "[x] bar", "[ ] baz"]);
        assert!(all.is_complete());

        let open = query(&roots, &FilterConfig::new().with_statuses([TaskStatus::Open]));
        assert_eq!(bodies(&open), vec!["[ ] foo", "[ ] baz"]);
    }

    #[test]
    fn missing_root_does_not_stop_others() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "- [ ] foo\n");
        let roots = [
            ScanRoot::new(dir.path().join("missing")),
            ScanRoot::new(dir.path().join("a.md")),
        ];

        let result = query(&roots, &FilterConfig::new());

        assert_eq!(bodies(&result), vec!["[ ] foo"]);
        assert!(!result.is_complete());
        assert!(matches!(result.errors[0], VaultError::NotFound(_)));
    }

    #[test]
    fn roots_keep_their_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "- [ ] from a\n");
        write(dir.path(), "b.md", "- [ ] from b\n");
        let roots = [
            ScanRoot::new(dir.path().join("b.md")),
            ScanRoot::new(dir.path().join("a.md")),
        ];

        let result = query(&roots, &FilterConfig::new());
        assert_eq!(bodies(&result), vec!["[ ] from b", "[ ] from a"]);
    }

    #[test]
    fn unreadable_files_become_warnings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "- [ ] foo\n");
        fs::write(dir.path().join("b.md"), [0xff, 0xfe, 0x00]).unwrap();

        let result = query(&[ScanRoot::new(dir.path())], &FilterConfig::new());

        assert_eq!(bodies(&result), vec!["[ ] foo"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.is_complete());
    }

    #[test]
    fn calendar_query_applies_status_filter() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "2026-01-15.md", "- [ ] late\n- [x] finished\n");
        let calendar = Calendar::new(dir.path(), dir.path());
        let today = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();

        let filter = FilterConfig::new().with_statuses([TaskStatus::Open]);
        let result = query_calendar(&calendar, DateScope::Before(today), &filter).unwrap();

        assert_eq!(bodies(&result), vec!["[ ] late"]);
    }

    #[test]
    fn calendar_query_on_single_day() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "2026-01-16.md", "- [ ] today\n");
        write(dir.path(), "2026-01-15.md", "- [ ] yesterday\n");
        let calendar = Calendar::new(dir.path(), dir.path());
        let today = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();

        let result = query_calendar(&calendar, DateScope::On(today), &FilterConfig::new()).unwrap();
        assert_eq!(bodies(&result), vec!["[ ] today"]);
    }
}
