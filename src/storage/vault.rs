//! Vault access
//!
//! Resolves note names inside the vault and appends new tasks.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::calendar::Calendar;
use super::scanner::{is_note_file, NOTE_EXTENSION};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No vault configured. Set OT_VAULT_PATH or pass --vault.")]
    NoVault,

    #[error("Not a note file: {} is a directory", .0.display())]
    NotANote(PathBuf),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A directory tree of notes
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Opens an existing vault directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self, VaultError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(VaultError::NotFound(root.to_path_buf()));
        }

        let root = std::path::absolute(root).map_err(|source| VaultError::Read {
            path: root.to_path_buf(),
            source,
        })?;

        Ok(Self { root })
    }

    /// Returns the vault root (absolute)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the calendar for daily notes stored in `dir`.
    ///
    /// Relative directories are taken from the vault root; `None` means the
    /// daily notes live in the root itself.
    pub fn calendar(&self, dir: Option<&Path>) -> Calendar {
        let dir = match dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        };
        Calendar::new(self.root.clone(), dir)
    }

    /// Resolves a note name to a file path.
    ///
    /// `Projects/Ideas` becomes `<vault>/Projects/Ideas.md`, and so does a
    /// dotted name like `Meeting 2026.01.16`. Names that already end in the
    /// note extension and absolute paths are kept as given.
    pub fn resolve_note(&self, note: impl AsRef<Path>) -> PathBuf {
        let path = self.root.join(note);
        if is_note_file(&path) {
            return path;
        }

        let mut name = path.into_os_string();
        name.push(".");
        name.push(NOTE_EXTENSION);
        PathBuf::from(name)
    }

    /// Appends `- [ ] <text>` to a note and returns the file written.
    ///
    /// Missing parent directories are created. The line is written with a
    /// single append so readers never see half a task.
    pub fn append_task(&self, note: impl AsRef<Path>, text: &str) -> Result<PathBuf, VaultError> {
        let line = task_line(text)?;
        let path = self.resolve_note(note);

        if path.is_dir() {
            return Err(VaultError::NotANote(path));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| VaultError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut payload = String::new();
        if missing_trailing_newline(&path)? {
            payload.push('\n');
        }
        payload.push_str(&line);
        payload.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| VaultError::Write {
                path: path.clone(),
                source,
            })?;

        file.write_all(payload.as_bytes())
            .map_err(|source| VaultError::Write {
                path: path.clone(),
                source,
            })?;

        log::debug!("Appended task to {}", path.display());
        Ok(path)
    }
}

/// Formats the markdown line for a new open task
pub fn task_line(text: &str) -> Result<String, VaultError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(VaultError::InvalidTask("task text is empty".to_string()));
    }
    if text.contains(['\n', '\r']) {
        return Err(VaultError::InvalidTask(
            "task text must be a single line".to_string(),
        ));
    }

    Ok(format!("- [ ] {}", text))
}

/// True if the file exists, is non-empty and its last byte is not `\n`
fn missing_trailing_newline(path: &Path) -> Result<bool, VaultError> {
    let read_err = |source: io::Error| VaultError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(read_err(e)),
    };

    let len = file.metadata().map_err(read_err)?.len();
    if len == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1)).map_err(read_err)?;
    file.read_exact(&mut last).map_err(read_err)?;

    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scanner::{scan, ScanRoot};
    use tempfile::TempDir;

    fn vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn open_missing_vault_fails() {
        let dir = TempDir::new().unwrap();
        let err = Vault::open(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }

    #[test]
    fn resolve_note_adds_extension() {
        let (dir, vault) = vault();
        let root = std::path::absolute(dir.path()).unwrap();

        assert_eq!(vault.resolve_note("Inbox"), root.join("Inbox.md"));
        assert_eq!(vault.resolve_note("Projects/Ideas"), root.join("Projects/Ideas.md"));
        assert_eq!(vault.resolve_note("Daily.MD"), root.join("Daily.MD"));
        assert_eq!(vault.resolve_note("todo.txt"), root.join("todo.txt.md"));
        assert_eq!(
            vault.resolve_note("Meeting 2026.01.16"),
            root.join("Meeting 2026.01.16.md")
        );
    }

    #[test]
    fn dotted_note_name_can_be_scanned_back() {
        let (dir, vault) = vault();

        let path = vault.append_task("Meeting 2026.01.16", "follow up").unwrap();
        assert!(path.ends_with("Meeting 2026.01.16.md"));

        let records: Vec<_> = scan(&ScanRoot::new(&path)).unwrap().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body(), "[ ] follow up");

        let in_vault = scan(&ScanRoot::new(dir.path())).unwrap().count();
        assert_eq!(in_vault, 1);
    }

    #[test]
    fn append_creates_file_and_parents() {
        let (_dir, vault) = vault();

        let path = vault.append_task("Projects/Ideas", "write docs").unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("Projects/Ideas.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [ ] write docs\n");
    }

    #[test]
    fn append_keeps_existing_content() {
        let (dir, vault) = vault();
        fs::write(dir.path().join("Inbox.md"), "# Inbox\n- [x] old\n").unwrap();

        vault.append_task("Inbox", "new").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("Inbox.md")).unwrap(),
            "# Inbox\n- [x] old\n- [ ] new\n"
        );
    }

    #[test]
    fn append_after_missing_newline_starts_new_line() {
        let (dir, vault) = vault();
        fs::write(dir.path().join("Inbox.md"), "- [x] old").unwrap();

        vault.append_task("Inbox", "new").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("Inbox.md")).unwrap(),
            "- [x] old\n- [ ] new\n"
        );
    }

    #[test]
    fn append_rejects_bad_text() {
        let (_dir, vault) = vault();

        assert!(matches!(
            vault.append_task("Inbox", "   "),
            Err(VaultError::InvalidTask(_))
        ));
        assert!(matches!(
            vault.append_task("Inbox", "two\nlines"),
            Err(VaultError::InvalidTask(_))
        ));
    }

    #[test]
    fn append_to_directory_fails() {
        let (dir, vault) = vault();
        fs::create_dir_all(dir.path().join("Inbox.md")).unwrap();

        assert!(matches!(
            vault.append_task("Inbox", "task"),
            Err(VaultError::NotANote(_))
        ));
    }

    #[test]
    fn task_line_format() {
        assert_eq!(task_line("  buy milk ").unwrap(), "- [ ] buy milk");
    }

    #[test]
    fn calendar_defaults_to_vault_root() {
        let (dir, vault) = vault();
        let root = std::path::absolute(dir.path()).unwrap();

        assert_eq!(vault.calendar(None).dir(), root.as_path());
        assert_eq!(
            vault.calendar(Some(Path::new("Calendar"))).dir(),
            root.join("Calendar").as_path()
        );
    }
}
