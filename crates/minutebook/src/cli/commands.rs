//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

/// Init command arguments.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Discard any existing data and reseed the demonstration record
    #[arg(short, long)]
    pub force: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Identifier of the meeting to show
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Read the new record as JSON from this file
    #[arg(short = 'F', long, conflicts_with = "title")]
    pub file: Option<PathBuf>,

    /// Meeting title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Meeting date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Participant name (repeatable)
    #[arg(short, long = "participant")]
    pub participants: Vec<String>,

    /// Discussed topic (repeatable)
    #[arg(short = 'o', long = "topic")]
    pub topics: Vec<String>,

    /// Decision reached (repeatable)
    #[arg(short = 'e', long = "decision")]
    pub decisions: Vec<String>,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Identifier of the meeting to edit
    pub id: String,

    /// Read the fields to change as JSON from this file
    #[arg(short = 'F', long)]
    pub file: PathBuf,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Identifier of the meeting to delete
    pub id: String,
}

/// Task management commands.
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Mark a task as completed
    Done {
        /// Identifier of the meeting
        meeting_id: String,
        /// Identifier of the task
        task_id: String,
    },

    /// Mark a task as pending
    Pending {
        /// Identifier of the meeting
        meeting_id: String,
        /// Identifier of the task
        task_id: String,
    },

    /// List the tasks of a meeting
    List {
        /// Identifier of the meeting
        meeting_id: String,
    },
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// The search term (matches title, participants, topics, decisions, tasks)
    pub term: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Identifier of the meeting to export
    pub id: String,

    /// Write the document to this path ("-" for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_task_command_debug() {
        let cmd = TaskCommand::Done {
            meeting_id: "m1".to_string(),
            task_id: "t1".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Done"));
        assert!(debug_str.contains("m1"));
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            file: None,
            title: Some("Sync".to_string()),
            date: None,
            participants: vec!["Ana".to_string()],
            topics: Vec::new(),
            decisions: Vec::new(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Sync"));
        assert!(debug_str.contains("Ana"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_output_format_clone() {
        let format = OutputFormat::Table;
        let cloned = format;
        assert_eq!(format, cloned);
    }
}
