//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for wildcat using the `clap` crate.
//!
//! # Commands
//!
//! - **list**: Refresh the catalog and list every wildcard (default)
//! - **show**: Show one wildcard's entry and metadata
//! - **edit**: Change a wildcard's description, activation text, negative text or notes
//! - **clean**: Move stale and non-conforming assets to the backup directory
//! - **roots**: Print the wildcard directories that will be scanned
//! - **config**: Get or set configuration values
//! - **completions**: Generate shell completions
//!
//! # Examples
//!
//! ```
//! use wildcat::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["wildcat", "show", "colors/warm"]);
//! assert!(matches!(cli.get_command(), Commands::Show { .. }));
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::catalog::SortKey;
use crate::sidecar::RecordEdit;

/// Sort order for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Category, then display name
    #[default]
    Default,
    /// Display name only
    Name,
}

impl From<SortOrder> for SortKey {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Default => Self::Default,
            SortOrder::Name => Self::Name,
        }
    }
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., wildcard_wrap=__)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., wildcard_dirs)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the path of the configuration file
    Path,
}

#[derive(Parser, Debug)]
#[command(name = "wildcat")]
#[command(about = "Sidecar metadata catalog for prompt wildcards", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this configuration file instead of the default one
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Refresh the catalog and list every wildcard (default)
    #[command(visible_alias = "ls")]
    List {
        /// Sort order
        #[arg(short = 's', long = "sort", value_enum, default_value_t = SortOrder::Default)]
        sort: SortOrder,

        /// Print entries as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show a wildcard's catalog entry and metadata
    Show {
        /// Wildcard identifier (e.g., colors/warm)
        #[arg(value_name = "WILDCARD")]
        wildcard: String,

        /// Print the entry as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Edit a wildcard's metadata
    #[command(visible_alias = "e")]
    Edit {
        /// Wildcard identifier (e.g., colors/warm)
        #[arg(value_name = "WILDCARD")]
        wildcard: String,

        /// New description
        #[arg(short = 'd', long = "description")]
        description: Option<String>,

        /// New activation text (inserted into the positive prompt)
        #[arg(short = 'a', long = "activation")]
        activation: Option<String>,

        /// New negative text (inserted into the negative prompt)
        #[arg(short = 'n', long = "negative")]
        negative: Option<String>,

        /// New notes
        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Move stale and non-conforming assets to the backup directory
    #[command(visible_alias = "c")]
    Clean {
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Print the wildcard directories that will be scanned
    Roots,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Field edits carried by the edit command
    #[must_use]
    pub fn get_record_edit(&self) -> Option<RecordEdit> {
        match self {
            Self::Edit {
                description,
                activation,
                negative,
                notes,
                ..
            } => Some(RecordEdit {
                description: description.clone(),
                activation_text: activation.clone(),
                negative_text: negative.clone(),
                notes: notes.clone(),
            }),
            _ => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to List if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::List {
            sort: SortOrder::Default,
            json: false,
        })
    }

    /// Log filter directive implied by `-v` flags
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
