//! Command-line runtime for the stencil server scaffold.
//!
//! The runtime parses arguments, resolves layered configuration, installs
//! logging, and drives the server process lifecycle (`start`, `status`,
//! `stop`) through a pid file. Every line shown to the operator is rendered
//! from the message catalog and written to caller-supplied streams, so tests
//! can substitute the configuration loader and capture output.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use stencil_config::{LogSettings, Settings};
use stencil_messages::{Message, MessageCatalog, codes};

mod cli;
mod config;
mod errors;
pub mod logging;
mod output;
mod process;

use cli::{Cli, CliCommand};
use config::{ConfigLoader, LayeredConfigLoader, log_provenance};
use errors::AppError;
use logging::TelemetryError;
use output::ConsoleOutput;
pub use process::{
    LaunchError, LifecycleReporter, LifecycleState, ProcessProbe, Relauncher, ShutdownError,
    ShutdownSignal, StructuredLifecycleReporter, SystemProbe, SystemRelauncher,
    SystemShutdownSignal, foreground_arguments,
};
use process::{
    ProcessControl, ServerStatus, StartRequest, StopWait, start_with, status_with, stop_with,
};

type LoggingHook = fn(&LogSettings) -> Result<(), TelemetryError>;

struct CliRunner<'a, L: ConfigLoader> {
    catalog: &'a MessageCatalog,
    loader: &'a L,
    init_logging: LoggingHook,
}

impl<'a, L: ConfigLoader> CliRunner<'a, L> {
    fn new(catalog: &'a MessageCatalog, loader: &'a L) -> Self {
        Self {
            catalog,
            loader,
            init_logging: |settings| logging::initialise(settings).map(|_| ()),
        }
    }

    #[cfg(test)]
    fn with_logging(mut self, init_logging: LoggingHook) -> Self {
        self.init_logging = init_logging;
        self
    }

    fn run<I, W, E>(&self, args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
        W: Write,
        E: Write,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let mut output = ConsoleOutput::new(self.catalog, stdout, stderr);
        match self.execute(&args, &mut output) {
            Ok(exit_code) => exit_code,
            Err(error) => {
                output.errors(&error.messages());
                error.exit_code()
            }
        }
    }

    fn execute<W, E>(
        &self,
        args: &[OsString],
        output: &mut ConsoleOutput<'_, W, E>,
    ) -> Result<ExitCode, AppError>
    where
        W: Write,
        E: Write,
    {
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(output.stdout(), "{}", error.render()).map_err(AppError::Help)?;
                return Ok(ExitCode::SUCCESS);
            }
            Err(error) => return Err(AppError::CliUsage(error)),
        };

        let Some(command) = cli.command else {
            let help = Cli::command().render_help();
            write!(output.stdout(), "{help}").map_err(AppError::Help)?;
            return Ok(ExitCode::SUCCESS);
        };

        let loaded = self.loader.load(&cli.overrides)?;
        (self.init_logging)(&log_settings_for(command, &loaded.settings))?;
        log_provenance(&loaded.store);

        dispatch(command, &loaded.settings, args, output)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Log settings for `command`.
///
/// Only a foreground `start` rotates the file on startup. `status`, `stop`,
/// and a daemon launcher append to the log of the server that owns it.
fn log_settings_for(command: CliCommand, settings: &Settings) -> LogSettings {
    let owns_log = command == CliCommand::Start && !settings.daemon;
    LogSettings {
        rotate_on_startup: settings.log.rotate_on_startup && owns_log,
        ..settings.log.clone()
    }
}

fn dispatch<W, E>(
    command: CliCommand,
    settings: &Settings,
    args: &[OsString],
    output: &mut ConsoleOutput<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let pid_file = &settings.server.pid_file;
    match command {
        CliCommand::Start => {
            let request = StartRequest {
                settings,
                arguments: args,
                pid: std::process::id(),
            };
            start_with(
                &request,
                &ProcessControl::system(),
                &StructuredLifecycleReporter,
                output,
            )?;
        }
        CliCommand::Status => match status_with(pid_file, &SystemProbe)? {
            ServerStatus::Running { pid } => {
                output.info(&Message::new(codes::INFO_SERVER_IS_RUNNING).with_arg(pid));
            }
            ServerStatus::NotRunning => {
                output.info(&Message::new(codes::INFO_SERVER_NOT_RUNNING).with_arg(pid_file));
            }
        },
        CliCommand::Stop => {
            let pid = stop_with(pid_file, &SystemProbe, StopWait::default(), output)?;
            output.info(
                &Message::new(codes::INFO_SERVER_STOP)
                    .with_arg(pid)
                    .with_arg(pid_file),
            );
        }
    }
    Ok(())
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns exit status 2 for usage errors and 1 for every other failure.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let catalog = MessageCatalog::standard();
    CliRunner::new(&catalog, &LayeredConfigLoader).run(args, stdout, stderr)
}

#[cfg(test)]
mod tests;
