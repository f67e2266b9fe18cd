//! Defines the error surface of the process lifecycle commands.

use std::io;
use std::time::Duration;

use camino::Utf8PathBuf;
use nix::errno::Errno;
use stencil_messages::{Message, codes};
use thiserror::Error;

use super::shutdown::ShutdownError;

/// Errors surfaced while starting, inspecting, or stopping the server process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The pid file exists but could not be read.
    #[error("failed to read pid file '{path}': {source}")]
    PidRead {
        /// Pid file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Probing a recorded pid failed for a reason other than absence.
    #[error("failed to check whether pid {pid} is running: {source}")]
    CheckProcess {
        /// Pid read from the pid file.
        pid: u32,
        /// Errno reported by `kill(2)`.
        #[source]
        source: Errno,
    },
    /// A live process already owns the pid file.
    #[error("server already running with pid {pid} (pid file '{path}')")]
    AlreadyRunning {
        /// Pid file path.
        path: Utf8PathBuf,
        /// Pid recorded in the file.
        pid: u32,
    },
    /// Writing the pid file failed.
    #[error("failed to write pid file '{path}': {source}")]
    PidWrite {
        /// Pid file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Removing the pid file on shutdown failed.
    #[error("failed to remove pid file '{path}': {source}")]
    PidRemove {
        /// Pid file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The running executable could not be located for relaunch.
    #[error("failed to resolve current executable: {source}")]
    CurrentExecutable {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Spawning the background child failed.
    #[error("failed to relaunch '{program}' in background: {source}")]
    Relaunch {
        /// Program that failed to spawn.
        program: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Installing or waiting on termination signals failed.
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
    /// `stop` found no live process.
    #[error("server is not running (pid file '{path}')")]
    NotRunning {
        /// Pid file path.
        path: Utf8PathBuf,
    },
    /// Delivering `SIGTERM` failed.
    #[error("failed to signal pid {pid}: {source}")]
    Signal {
        /// Target pid.
        pid: u32,
        /// Errno reported by `kill(2)`.
        #[source]
        source: Errno,
    },
    /// The process did not remove its pid file in time.
    #[error("server with pid {pid} did not stop within {timeout:?}")]
    StopTimeout {
        /// Target pid.
        pid: u32,
        /// Time waited.
        timeout: Duration,
    },
}

impl LaunchError {
    /// Catalog message describing the failure.
    #[must_use]
    pub fn message(&self) -> Message {
        match self {
            Self::PidRead { path, source } => Message::new(codes::ERR_CHECK_SERVER_PID)
                .with_arg(path)
                .with_arg(source),
            Self::CheckProcess { pid, source } => {
                Message::new(codes::ERR_CHECK_SERVER_RUNNING_STATUS)
                    .with_arg(pid)
                    .with_arg(source)
            }
            Self::AlreadyRunning { path, pid } => Message::new(codes::ERR_SERVER_IS_RUNNING)
                .with_arg(path)
                .with_arg(pid),
            Self::PidWrite { path, source } => Message::new(codes::ERR_SAVE_PID_TO_FILE)
                .with_arg(path)
                .with_arg(source),
            Self::PidRemove { path, source } => Message::new(codes::ERR_REMOVE_PID_FILE)
                .with_arg(path)
                .with_arg(source),
            Self::CurrentExecutable { source } => {
                Message::new(codes::ERR_CURRENT_EXECUTABLE).with_arg(source)
            }
            Self::Relaunch { program, source } => Message::new(codes::ERR_RELAUNCH_DAEMON)
                .with_arg(program)
                .with_arg(source),
            Self::Shutdown(error) => Message::new(codes::ERR_INSTALL_SIGNAL_HANDLER).with_arg(error),
            Self::NotRunning { path } => Message::new(codes::ERR_SERVER_NOT_RUNNING).with_arg(path),
            Self::Signal { pid, source } => Message::new(codes::ERR_STOP_SERVER)
                .with_arg(pid)
                .with_arg(source),
            Self::StopTimeout { pid, timeout } => Message::new(codes::ERR_STOP_TIMEOUT)
                .with_arg(pid)
                .with_arg(timeout.as_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use stencil_messages::MessageCatalog;

    use super::*;

    #[test]
    fn already_running_renders_path_then_pid() {
        let error = LaunchError::AlreadyRunning {
            path: Utf8PathBuf::from("/run/stencil.pid"),
            pid: 4242,
        };
        let line = MessageCatalog::standard().render(&error.message());
        assert_eq!(
            line,
            "stencil-402003: pid file exists and the server is still running, please have a check. pid file: /run/stencil.pid, pid: 4242"
        );
    }

    #[test]
    fn stop_timeout_reports_milliseconds() {
        let error = LaunchError::StopTimeout {
            pid: 7,
            timeout: Duration::from_secs(10),
        };
        assert_eq!(error.message().args(), ["7", "10000"]);
    }
}
