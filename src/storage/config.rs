//! Configuration handling for obsidian-tasks
//!
//! Settings come from, in order of precedence: the process environment, a
//! `.env` file in the current directory, and `config.toml` in the user
//! config directory (e.g. `~/.config/obsidian-tasks/config.toml`).
//! Command-line flags are applied on top by the CLI.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vault::VaultError;

pub const ENV_VAULT_PATH: &str = "OT_VAULT_PATH";
pub const ENV_INBOX_NOTE: &str = "OT_INBOX_NOTE";
pub const ENV_INBOX_PATH: &str = "OT_INBOX_PATH";
pub const ENV_CALENDAR_DIR: &str = "OT_CALENDAR_DIR";
pub const ENV_COLOR: &str = "OT_COLOR";

/// Note used for the inbox and as the default `add` target
pub const DEFAULT_INBOX_NOTE: &str = "Inbox";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} (expected true or false)")]
    InvalidBool { key: String, value: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Contents of the settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory of the vault
    pub vault_path: Option<PathBuf>,

    /// Inbox note name inside the vault
    pub inbox_note: Option<String>,

    /// Inbox file or folder, overriding `inbox_note`
    pub inbox_path: Option<PathBuf>,

    /// Daily notes directory, relative to the vault
    pub calendar_dir: Option<PathBuf>,

    /// Colorize checkboxes by default
    pub color: Option<bool>,
}

/// Resolved configuration, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vault_path: Option<PathBuf>,
    pub inbox_note: String,
    pub inbox_path: Option<PathBuf>,
    pub calendar_dir: Option<PathBuf>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_path: None,
            inbox_note: DEFAULT_INBOX_NOTE.to_string(),
            inbox_path: None,
            calendar_dir: None,
            color: false,
        }
    }
}

impl Config {
    /// Loads configuration from the settings file, `.env` and the environment.
    ///
    /// `settings_path` overrides the default settings file location.
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        load_dotenv();

        let settings = match settings_path {
            Some(path) => Self::load_settings(path)?,
            None => match Self::settings_path() {
                Some(path) if path.exists() => Self::load_settings(&path)?,
                _ => Settings::default(),
            },
        };

        Self::from_sources(settings, |key| std::env::var(key).ok())
            .context("Failed to read configuration from environment")
    }

    /// Merges settings with environment values read through `env`.
    ///
    /// Non-empty environment values win over settings file values.
    pub fn from_sources<F>(settings: Settings, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let color = match var(ENV_COLOR) {
            Some(value) => parse_bool(ENV_COLOR, &value)?,
            None => settings.color.unwrap_or(false),
        };

        Ok(Self {
            vault_path: var(ENV_VAULT_PATH)
                .map(PathBuf::from)
                .or(settings.vault_path)
                .map(|p| expand_home(&p)),
            inbox_note: var(ENV_INBOX_NOTE)
                .or(settings.inbox_note)
                .unwrap_or_else(|| DEFAULT_INBOX_NOTE.to_string()),
            inbox_path: var(ENV_INBOX_PATH)
                .map(PathBuf::from)
                .or(settings.inbox_path)
                .map(|p| expand_home(&p)),
            calendar_dir: var(ENV_CALENDAR_DIR)
                .map(PathBuf::from)
                .or(settings.calendar_dir)
                .map(|p| expand_home(&p)),
            color,
        })
    }

    /// Returns the default settings file location
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("md", "obsidian", "obsidian-tasks")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads and parses a settings file
    fn load_settings(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    /// Returns the vault root, or an error if none is configured
    pub fn require_vault(&self) -> Result<&Path, VaultError> {
        self.vault_path.as_deref().ok_or(VaultError::NoVault)
    }

    /// Returns the inbox file or folder.
    ///
    /// `inbox_path` wins; otherwise the inbox note inside the vault, which
    /// may be a folder (`Inbox/`) or a note (`Inbox.md`).
    pub fn inbox(&self) -> Result<PathBuf, VaultError> {
        if let Some(path) = &self.inbox_path {
            return Ok(path.clone());
        }

        let base = self.require_vault()?.join(&self.inbox_note);
        if base.exists() {
            return Ok(base);
        }

        let note = base.with_extension(super::scanner::NOTE_EXTENSION);
        if note.exists() {
            Ok(note)
        } else {
            Ok(base)
        }
    }

    /// Returns the note `add` writes to when no note is given.
    ///
    /// Follows [`Config::inbox`] so added tasks show up in `ot inbox`: an
    /// inbox folder receives `<folder>/<inbox note>.md`, otherwise the inbox
    /// note itself is used.
    pub fn add_target(&self) -> Result<PathBuf, VaultError> {
        let inbox = self.inbox()?;
        if !inbox.is_dir() {
            return Ok(inbox);
        }

        let name = Path::new(&self.inbox_note)
            .file_name()
            .unwrap_or_else(|| OsStr::new(DEFAULT_INBOX_NOTE));
        Ok(inbox.join(name))
    }
}

/// Loads `.env` from the current directory without overriding set variables
fn load_dotenv() {
    let path = Path::new(".env");
    if !path.is_file() {
        return;
    }

    match dotenvy::from_path(path) {
        Ok(()) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Expands a leading `~` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = Config::from_sources(Settings::default(), env(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.inbox_note, "Inbox");
        assert!(!config.color);
        assert!(matches!(config.require_vault(), Err(VaultError::NoVault)));
    }

    #[test]
    fn environment_overrides_settings() {
        let settings = Settings {
            vault_path: Some(PathBuf::from("/settings/vault")),
            inbox_note: Some("Todo".to_string()),
            color: Some(true),
            ..Settings::default()
        };

        let config = Config::from_sources(
            settings,
            env(&[
                (ENV_VAULT_PATH, "/env/vault"),
                (ENV_CALENDAR_DIR, "Calendar"),
                (ENV_COLOR, "off"),
            ]),
        )
        .unwrap();

        assert_eq!(config.vault_path, Some(PathBuf::from("/env/vault")));
        assert_eq!(config.inbox_note, "Todo");
        assert_eq!(config.calendar_dir, Some(PathBuf::from("Calendar")));
        assert!(!config.color);
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let settings = Settings {
            vault_path: Some(PathBuf::from("/settings/vault")),
            ..Settings::default()
        };

        let config = Config::from_sources(settings, env(&[(ENV_VAULT_PATH, "  ")])).unwrap();
        assert_eq!(config.vault_path, Some(PathBuf::from("/settings/vault")));
    }

    #[test]
    fn invalid_color_is_an_error() {
        let err = Config::from_sources(Settings::default(), env(&[(ENV_COLOR, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }

    #[test]
    fn parse_settings_file() {
        let toml = r#"
vault_path = "/notes"
calendar_dir = "Daily"
color = true
"#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.vault_path, Some(PathBuf::from("/notes")));
        assert_eq!(settings.calendar_dir, Some(PathBuf::from("Daily")));
        assert_eq!(settings.color, Some(true));
        assert_eq!(settings.inbox_note, None);
    }

    #[test]
    fn load_settings_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "color = \"very\"").unwrap();

        let err = Config::load_settings(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse settings"));
    }

    #[test]
    fn home_is_expanded() {
        let expanded = expand_home(Path::new("~/vault"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("vault"));

        assert_eq!(expand_home(Path::new("/abs/vault")), PathBuf::from("/abs/vault"));
    }

    #[test]
    fn inbox_resolution() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            vault_path: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        // Neither exists: the folder form is reported
        assert_eq!(config.inbox().unwrap(), dir.path().join("Inbox"));

        fs::write(dir.path().join("Inbox.md"), "- [ ] a\n").unwrap();
        assert_eq!(config.inbox().unwrap(), dir.path().join("Inbox.md"));

        fs::create_dir(dir.path().join("Inbox")).unwrap();
        assert_eq!(config.inbox().unwrap(), dir.path().join("Inbox"));

        config.inbox_path = Some(PathBuf::from("/elsewhere/inbox"));
        assert_eq!(config.inbox().unwrap(), PathBuf::from("/elsewhere/inbox"));
    }

    #[test]
    fn add_target_follows_inbox() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            vault_path: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        assert_eq!(config.add_target().unwrap(), dir.path().join("Inbox"));

        fs::write(dir.path().join("Inbox.md"), "").unwrap();
        assert_eq!(config.add_target().unwrap(), dir.path().join("Inbox.md"));

        fs::create_dir(dir.path().join("Inbox")).unwrap();
        assert_eq!(config.add_target().unwrap(), dir.path().join("Inbox/Inbox"));

        config.inbox_note = "Areas/Todo".to_string();
        fs::create_dir_all(dir.path().join("Areas/Todo")).unwrap();
        assert_eq!(
            config.add_target().unwrap(),
            dir.path().join("Areas/Todo/Todo")
        );
    }
}
