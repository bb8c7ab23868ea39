//! Task record rendering
//!
//! Two forms: a display line (the task body, optionally with a colored
//! checkbox) and a structured record for JSON output.

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use super::task::{TaskRecord, TaskStatus};

/// Structured form of a task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskJson {
    /// Absolute path of the note file
    pub file: String,

    /// 1-based line number
    pub line_number: usize,

    /// Task body, e.g. `[ ] buy milk`
    pub text: String,
}

impl From<&TaskRecord> for TaskJson {
    fn from(record: &TaskRecord) -> Self {
        Self {
            file: record.file().display().to_string(),
            line_number: record.line_number(),
            text: record.body().to_string(),
        }
    }
}

/// Renders the display line for a record.
///
/// With `color` set, the checkbox token is wrapped in an ANSI color chosen by
/// status. Whether escapes are emitted also depends on the `colored` global
/// override, which the CLI sets from its color flag.
pub fn display_line(record: &TaskRecord, color: bool) -> String {
    let body = record.body();
    if !color {
        return body.to_string();
    }

    // `[`, the checkbox character, `]`
    let (token, rest) = body.split_at(2 + record.checkbox().len_utf8());

    match paint(token, record.status()) {
        Some(painted) => format!("{}{}", painted, rest),
        None => body.to_string(),
    }
}

fn paint(token: &str, status: TaskStatus) -> Option<ColoredString> {
    match status {
        TaskStatus::Open => Some(token.red()),
        TaskStatus::Done => Some(token.green()),
        TaskStatus::Cancelled => Some(token.bright_black()),
        TaskStatus::Unknown => None,
    }
}
