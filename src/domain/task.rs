//! Task domain model
//!
//! A task record is one matched line in one note file. Records are built by
//! the scanner and never modified afterwards.

use std::path::{Path, PathBuf};

use super::line::{self, TaskLine};

/// Status of a task, derived from its checkbox character
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, clap::ValueEnum)]
pub enum TaskStatus {
    /// `[ ]`
    #[default]
    Open,
    /// `[x]` or `[X]`
    Done,
    /// `[-]`
    Cancelled,
    /// Any other checkbox character
    Unknown,
}

impl TaskStatus {
    /// Classifies a checkbox character
    pub fn from_checkbox(c: char) -> Self {
        match c {
            ' ' => TaskStatus::Open,
            'x' | 'X' => TaskStatus::Done,
            '-' => TaskStatus::Cancelled,
            _ => TaskStatus::Unknown,
        }
    }
}

/// A task found in a note file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    file: PathBuf,
    line_number: usize,
    raw_text: String,
    checkbox: char,
    body: String,
    status: TaskStatus,
}

impl TaskRecord {
    /// Builds a record from a raw line, or `None` if the line is not a task.
    ///
    /// `line_number` is 1-based.
    pub fn from_line(file: impl Into<PathBuf>, line_number: usize, raw: &str) -> Option<Self> {
        debug_assert!(line_number >= 1, "line numbers are 1-based");
        let TaskLine { checkbox, body } = line::parse(raw)?;

        Some(Self {
            file: file.into(),
            line_number,
            raw_text: raw.trim_end_matches(['\r', '\n']).to_string(),
            checkbox,
            body: body.to_string(),
            status: TaskStatus::from_checkbox(checkbox),
        })
    }

    /// The note file containing this task
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// 1-based line number within the file
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The line as it appears in the file
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn checkbox(&self) -> char {
        self.checkbox
    }

    /// The line from the checkbox onwards, e.g. `[ ] buy milk`
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns true if the line carries the `! ` priority marker
    pub fn is_priority(&self) -> bool {
        line::is_priority(&self.raw_text)
    }

    /// Key identifying the source line, used for de-duplication
    pub fn location(&self) -> (&Path, usize) {
        (&self.file, self.line_number)
    }
}
