//! Task line recognition
//!
//! A task line is a list item with a single-character checkbox:
//!
//! ```text
//! - [ ] open task
//!     * [x] done, indented
//! ```
//!
//! Anything else on the line is treated as free text. There is no markdown
//! parsing beyond this one pattern.

/// List markers accepted in front of the checkbox
const PREFIXES: [&str; 2] = ["- [", "* ["];

/// Literal that marks a priority task when it directly follows the checkbox
const PRIORITY_MARKER: &str = "] ! ";

/// A recognized task line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    /// The single character between the brackets
    pub checkbox: char,

    /// The line from the opening `[` to the end, line ending removed
    pub body: &'a str,
}

/// Matches a single line against the task pattern.
///
/// Returns `None` for lines that are not tasks; callers skip those.
pub fn parse(line: &str) -> Option<TaskLine<'_>> {
    let line = strip_line_ending(line);
    let trimmed = line.trim_start();

    if !PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        return None;
    }

    // Both prefixes are ASCII, so the bracket sits at byte 2
    let body = &trimmed[2..];
    let mut chars = body[1..].chars();
    let checkbox = chars.next()?;
    if chars.next() != Some(']') {
        return None;
    }

    Some(TaskLine { checkbox, body })
}

/// Returns true if the line is a task line.
pub fn is_task_line(line: &str) -> bool {
    parse(line).is_some()
}

/// Returns true if the line is a task marked as priority (`- [ ] ! text`).
///
/// The `!` must follow the checkbox after exactly one space and be followed
/// by a space. An exclamation mark elsewhere in the text does not count.
pub fn is_priority(line: &str) -> bool {
    match parse(line) {
        Some(task) => {
            let close = 1 + task.checkbox.len_utf8();
            task.body[close..].starts_with(PRIORITY_MARKER)
        }
        None => false,
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
