//! Command-line interface for minutebook.
//!
//! This module provides the CLI structure and command definitions for the
//! `mbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ExportCommand, InitCommand,
    ListCommand, OutputFormat, SearchCommand, ShowCommand, StatsCommand, TaskCommand,
};

/// mbook - Keep your meeting minutes in order
///
/// A local record keeper for meeting minutes: participants, discussed
/// topics, decisions, and assignable tasks with completion state.
#[derive(Debug, Parser)]
#[command(name = "mbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize the data store, seeding a demonstration record
    Init(InitCommand),

    /// List all meetings, most recent first
    List(ListCommand),

    /// Show one meeting in full
    Show(ShowCommand),

    /// Add a new meeting
    Add(AddCommand),

    /// Change fields of an existing meeting
    Edit(EditCommand),

    /// Delete a meeting
    Delete(DeleteCommand),

    /// Manage a meeting's tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Search meetings by title, participant, topic, decision, or task
    Search(SearchCommand),

    /// Export a meeting as a Markdown document
    Export(ExportCommand),

    /// Show record and task counts
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
