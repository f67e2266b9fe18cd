//! CLI argument definitions for the `stencil` binary.

use clap::{Parser, Subcommand};
use stencil_config::CliOverrides;

/// Command-line interface for the stencil server scaffold.
#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Runs and controls the stencil server process.",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Configuration overrides; each flag is optional and global.
    #[command(flatten)]
    pub(crate) overrides: CliOverrides,
    /// Lifecycle action to perform.
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

/// Lifecycle actions.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Starts the server in the foreground, or in the background with `--daemon true`.
    Start,
    /// Reports whether a server owns the configured pid file.
    Status,
    /// Sends a termination signal to the running server and waits for it to exit.
    Stop,
}
