//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use super::output::{Output, OutputFormat};
use super::{add, list};
use crate::domain::{FilterConfig, TaskStatus};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "ot")]
#[command(author, version, about = "Checkbox tasks across a vault of markdown notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Vault directory (overrides OT_VAULT_PATH)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Colorize checkboxes by status
    #[arg(long, short = 'c', global = true)]
    pub color: bool,

    /// Never colorize, even with --color or OT_COLOR
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Status and priority filters shared by the listing commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only show tasks with these statuses (comma-separated)
    #[arg(long, short = 's', value_enum, value_delimiter = ',')]
    pub status: Vec<TaskStatus>,

    /// Only show priority tasks (`- [ ] ! ...`)
    #[arg(long, short = 'p')]
    pub priority: bool,
}

impl From<FilterArgs> for FilterConfig {
    fn from(args: FilterArgs) -> Self {
        FilterConfig::new()
            .with_statuses(args.status)
            .with_priority_only(args.priority)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in the inbox folder or note
    Inbox {
        /// Inbox folder or file (defaults to OT_INBOX_PATH, then the vault's inbox note)
        #[arg(long)]
        path: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List tasks under files or directories
    List {
        /// Files or directories to scan (defaults to the whole vault)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List tasks in today's daily note and notes linking to it
    Today {
        /// Day to show instead of today (yyyy-mm-dd)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List tasks from earlier daily notes and notes linking to them
    Overdue {
        /// Reference day instead of today (yyyy-mm-dd)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Append an open task to a note
    ///
    /// Examples:
    ///   ot add "Buy milk"                   # appends to the inbox note
    ///   ot add --note Projects/site "Fix nav"
    Add {
        /// Note name or path inside the vault (defaults to the inbox note)
        #[arg(long, short)]
        note: Option<String>,

        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // RUST_LOG, when set, takes precedence over the verbose flag
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let output = Output::new(cli.format);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(vault) = cli.vault {
        config.vault_path = Some(vault);
    }
    if cli.no_color {
        config.color = false;
    } else if cli.color {
        config.color = true;
    }
    if config.color {
        colored::control::set_override(true);
    }

    log::debug!("Configuration: {:?}", config);

    let code = match cli.command {
        Commands::Inbox { path, filter } => list::inbox(&output, &config, path, &filter.into())?,
        Commands::List { paths, filter } => list::list(&output, &config, paths, &filter.into())?,
        Commands::Today { date, filter } => list::today(&output, &config, date, &filter.into())?,
        Commands::Overdue { date, filter } => {
            list::overdue(&output, &config, date, &filter.into())?
        }
        Commands::Add { note, text } => {
            add::run(&output, &config, note.as_deref(), &text.join(" "))?
        }
    };

    log::debug!("Command completed");
    Ok(code)
}
