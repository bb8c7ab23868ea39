//! Note file scanning
//!
//! Walks a file or directory, reads every note file and yields the task
//! records found in it. Files that cannot be read are skipped and reported
//! as warnings; they never abort a scan.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use walkdir::{DirEntry, WalkDir};

use super::vault::VaultError;
use crate::domain::TaskRecord;

/// Extension of note files, compared case-insensitively
pub const NOTE_EXTENSION: &str = "md";

/// A file or directory to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    path: PathBuf,
    daily: bool,
}

impl ScanRoot {
    /// A root named by the user; it must exist
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            daily: false,
        }
    }

    /// A root derived from the calendar; absent files are simply empty
    pub fn daily(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            daily: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_daily(&self) -> bool {
        self.daily
    }
}

/// A file skipped during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped {}: {}", self.path.display(), self.reason)
    }
}

/// Returns true if the path has the note extension
pub fn is_note_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(NOTE_EXTENSION))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Lists the note files under `root` in sorted path order.
///
/// A single note file lists itself; a file with another extension lists
/// nothing. Hidden files and directories below the root are skipped.
/// Traversal errors are returned alongside the files found.
pub fn note_files(root: &Path) -> (Vec<PathBuf>, Vec<ScanWarning>) {
    let mut files = Vec::new();
    let mut warnings = Vec::new();

    if root.is_file() {
        if is_note_file(root) {
            files.push(root.to_path_buf());
        }
        return (files, warnings);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_note_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                log::debug!("Cannot walk {}: {}", path.display(), e);
                warnings.push(ScanWarning {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    (files, warnings)
}

/// Reads one file and returns its task records in line order
pub fn scan_file(path: &Path) -> Result<Vec<TaskRecord>, VaultError> {
    let content = fs::read_to_string(path).map_err(|source| VaultError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| TaskRecord::from_line(path, idx + 1, line))
        .collect())
}

/// Starts scanning a root.
///
/// Fails with [`VaultError::NotFound`] if a user root does not exist. Daily
/// roots that do not exist produce an empty scan.
pub fn scan(root: &ScanRoot) -> Result<Scanner, VaultError> {
    let path = root.path();

    if !path.exists() {
        if root.is_daily() {
            log::debug!("Daily note {} does not exist", path.display());
            return Ok(Scanner::empty());
        }
        return Err(VaultError::NotFound(path.to_path_buf()));
    }

    let path = std::path::absolute(path).map_err(|source| VaultError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (files, warnings) = note_files(&path);
    log::debug!("Scanning {} note file(s) under {}", files.len(), path.display());

    Ok(Scanner {
        files: files.into_iter(),
        pending: Vec::new().into_iter(),
        warnings,
    })
}

/// Iterator over the task records of one scan root.
///
/// Files are read one at a time as the iterator advances.
#[derive(Debug)]
pub struct Scanner {
    files: vec::IntoIter<PathBuf>,
    pending: vec::IntoIter<TaskRecord>,
    warnings: Vec<ScanWarning>,
}

impl Scanner {
    fn empty() -> Self {
        Self {
            files: Vec::new().into_iter(),
            pending: Vec::new().into_iter(),
            warnings: Vec::new(),
        }
    }

    /// Takes the warnings collected so far
    pub fn take_warnings(&mut self) -> Vec<ScanWarning> {
        std::mem::take(&mut self.warnings)
    }
}

impl Iterator for Scanner {
    type Item = TaskRecord;

    fn next(&mut self) -> Option<TaskRecord> {
        loop {
            if let Some(record) = self.pending.next() {
                return Some(record);
            }

            let file = self.files.next()?;
            match scan_file(&file) {
                Ok(records) => self.pending = records.into_iter(),
                Err(e) => {
                    log::debug!("{}", e);
                    let reason = match &e {
                        VaultError::Read { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    self.warnings.push(ScanWarning { path: file, reason });
                }
            }
        }
    }
}
