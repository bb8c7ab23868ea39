//! Daily notes and date backlinks
//!
//! Daily notes are named `yyyy-mm-dd.md` and live in the calendar directory.
//! A note refers to a day by containing the literal token `[[yyyy-mm-dd]]`;
//! this is a plain substring check, not link parsing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::scanner::{is_note_file, note_files, ScanRoot, ScanWarning, NOTE_EXTENSION};
use super::vault::VaultError;
use crate::domain::DateScope;

/// Date format used for daily note names and backlink tokens
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// File name of the daily note for a date
pub fn daily_note_name(date: NaiveDate) -> String {
    format!("{}.{}", date.format(DATE_FORMAT), NOTE_EXTENSION)
}

/// The backlink token for a date, e.g. `[[2026-01-17]]`
pub fn backlink_token(date: NaiveDate) -> String {
    format!("[[{}]]", date.format(DATE_FORMAT))
}

/// Returns true if `content` links to the daily note for `date`
pub fn contains_backlink(content: &str, date: NaiveDate) -> bool {
    content.contains(&backlink_token(date))
}

/// Parses the date out of a daily note path, if it is one
pub fn daily_note_date(path: &Path) -> Option<NaiveDate> {
    if !is_note_file(path) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let date = NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()?;

    // Reject unpadded names like `2026-1-6`
    (date.format(DATE_FORMAT).to_string() == stem).then_some(date)
}

/// Scan roots selected for a date scope, plus files that could not be read
#[derive(Debug, Default)]
pub struct ScopedRoots {
    pub roots: Vec<ScanRoot>,
    pub warnings: Vec<ScanWarning>,
}

/// Daily notes of a vault
#[derive(Debug, Clone)]
pub struct Calendar {
    vault: PathBuf,
    dir: PathBuf,
}

impl Calendar {
    pub fn new(vault: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self {
            vault: vault.into(),
            dir: dir.into(),
        }
    }

    /// The directory holding daily notes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the daily note for `date` (whether or not it exists)
    pub fn daily_note_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(daily_note_name(date))
    }

    /// Existing daily notes dated strictly before `date`, oldest first
    pub fn daily_notes_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<(NaiveDate, PathBuf)>, VaultError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(VaultError::Read {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut notes: Vec<(NaiveDate, PathBuf)> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| daily_note_date(&path).map(|d| (d, path)))
            .filter(|(d, _)| *d < date)
            .collect();

        notes.sort();
        Ok(notes)
    }

    /// Selects the files to scan for a date scope.
    ///
    /// `On(date)`: the daily note for `date`, then every other note
    /// containing its backlink token. `Before(date)`: every existing daily
    /// note older than `date`, then every other note linking to any of them.
    /// Each file appears once.
    pub fn scope_roots(&self, scope: DateScope) -> Result<ScopedRoots, VaultError> {
        if !self.vault.is_dir() {
            return Err(VaultError::NotFound(self.vault.clone()));
        }

        let (daily, dates): (Vec<PathBuf>, Vec<NaiveDate>) = match scope {
            DateScope::On(date) => (vec![self.daily_note_path(date)], vec![date]),
            DateScope::Before(date) => self
                .daily_notes_before(date)?
                .into_iter()
                .map(|(d, path)| (path, d))
                .unzip(),
        };

        log::debug!(
            "Date scope {:?}: {} daily note(s), {} date(s)",
            scope,
            daily.len(),
            dates.len()
        );

        let mut included: HashSet<PathBuf> = daily.iter().cloned().collect();
        let mut scoped = ScopedRoots {
            roots: daily.into_iter().map(ScanRoot::daily).collect(),
            warnings: Vec::new(),
        };

        if dates.is_empty() {
            return Ok(scoped);
        }

        let (files, warnings) = note_files(&self.vault);
        scoped.warnings.extend(warnings);

        for file in files {
            if included.contains(&file) {
                continue;
            }

            let content = match fs::read_to_string(&file) {
                Ok(content) => content,
                Err(e) => {
                    log::debug!("Cannot read {}: {}", file.display(), e);
                    scoped.warnings.push(ScanWarning {
                        path: file,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if dates.iter().any(|d| contains_backlink(&content, *d)) {
                log::debug!("Backlink found in {}", file.display());
                included.insert(file.clone());
                scoped.roots.push(ScanRoot::daily(file));
            }
        }

        Ok(scoped)
    }
}
