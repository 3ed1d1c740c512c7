// Commands are namespaced (chemistry, session, config) rather than flat,
// e.g. `session export` instead of `export-session`.

use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "celltrace")]
#[command(about = "Classify, summarize and export battery cell monitoring sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory (defaults to $CELLTRACE_PATH or the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the chemistry policy table
    Chemistry {
        #[command(subcommand)]
        command: ChemistryCommand,
    },

    /// Work with recorded monitoring sessions
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Show or edit the workspace configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ChemistryCommand {
    /// List supported chemistries and their voltage windows
    List,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// List stored sessions
    List,

    /// Show averages, status distribution and alerts for a session
    Stats {
        /// Stored session name
        name: String,
    },

    /// Compare two sessions metric by metric
    Compare {
        /// Current session name
        current: String,
        /// Previous session name
        previous: String,
    },

    /// Export a session as CSV
    Export {
        /// Stored session name
        name: String,

        /// Output file (defaults to battery_monitoring_<timestamp>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a persisted session record (JSON) into the store
    ///
    /// Every reading is validated; a record without a bench identity takes
    /// the configured one.
    Import {
        /// Path to the session record
        file: PathBuf,

        /// Store under this name instead of the record's own
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the current configuration
    Show,

    /// Set the bench identity given to imported sessions that carry none
    SetBench {
        #[arg(long)]
        name: String,

        #[arg(long)]
        group: String,
    },
}
