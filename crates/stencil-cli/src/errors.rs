//! Error surface of the CLI runtime.

use std::io;
use std::process::ExitCode;

use stencil_config::ConfigError;
use stencil_messages::{Message, codes};
use thiserror::Error;

use crate::logging::TelemetryError;
use crate::process::LaunchError;

/// Exit status used for command-line usage errors, matching clap.
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to print help: {0}")]
    Help(io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl AppError {
    /// Catalog lines describing the failure, headline first.
    pub(crate) fn messages(&self) -> Vec<Message> {
        match self {
            Self::CliUsage(error) => {
                vec![Message::new(codes::ERR_COMMAND_LINE_USAGE).with_arg(error.to_string().trim_end())]
            }
            Self::Help(error) => vec![Message::new(codes::ERR_PRINT_HELP_INFO).with_arg(error)],
            Self::Config(error) => {
                let mut messages = vec![Message::new(codes::ERR_INIT_CONFIG), error.message()];
                messages.extend(error.details());
                messages
            }
            Self::Telemetry(error) => vec![error.message()],
            Self::Launch(error) => vec![error.message()],
        }
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::CliUsage(_) => ExitCode::from(USAGE_EXIT_CODE),
            _ => ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use stencil_config::ValidationErrors;

    use super::*;

    #[test]
    fn config_failure_leads_with_init_config() {
        let error = AppError::Config(ConfigError::Validation(ValidationErrors::default()));
        let lines: Vec<_> = error.messages().iter().map(Message::code).collect();
        assert_eq!(lines, vec![codes::ERR_INIT_CONFIG, codes::ERR_VALIDATE_CONFIG]);
    }

    #[test]
    fn launch_failure_is_a_single_line() {
        let error = AppError::Launch(LaunchError::AlreadyRunning {
            path: "/run/stencil.pid".into(),
            pid: 42,
        });
        let messages = error.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code(), codes::ERR_SERVER_IS_RUNNING);
    }
}
