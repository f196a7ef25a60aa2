//! Command-line interface for contactbox.
//!
//! This module provides the CLI structure for the `cbox` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClearCommand, ConfigCommand, InterestsCommand, ListCommand, OutputFormat, SortArg,
    StatusCommand, SubmitCommand,
};

/// cbox - Collect contact forms and list them locally
///
/// Submissions are kept in a local key-value store on this machine only.
#[derive(Debug, Parser)]
#[command(name = "cbox")]
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
    /// Submit a contact form
    Submit(SubmitCommand),

    /// List stored submissions
    List(ListCommand),

    /// List the distinct interests present
    Interests(InterestsCommand),

    /// Show storage status
    Status(StatusCommand),

    /// Delete all stored submissions
    Clear(ClearCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
