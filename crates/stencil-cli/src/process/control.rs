//! `status` and `stop` against a pid file written by another invocation.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8Path;
use stencil_messages::{Message, codes};
use tracing::info;

use crate::output::ConsoleOutput;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::pid_file::{PidFileStatus, inspect};
use super::probe::ProcessProbe;

const STOP_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Result of `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServerStatus {
    Running { pid: u32 },
    NotRunning,
}

/// Polling budget used by `stop`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StopWait {
    pub(crate) timeout: Duration,
    pub(crate) poll_interval: Duration,
}

impl Default for StopWait {
    fn default() -> Self {
        Self {
            timeout: STOP_TIMEOUT,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Reports whether a live process owns `pid_file`.
pub(crate) fn status_with<P>(pid_file: &Utf8Path, probe: &P) -> Result<ServerStatus, LaunchError>
where
    P: ProcessProbe,
{
    match inspect(pid_file, probe)? {
        PidFileStatus::Live { pid } => Ok(ServerStatus::Running { pid }),
        PidFileStatus::Absent | PidFileStatus::Stale { .. } | PidFileStatus::Dead { .. } => {
            Ok(ServerStatus::NotRunning)
        }
    }
}

/// Sends `SIGTERM` to the recorded process and waits for it to clean up.
///
/// Succeeds once the pid file is gone or the process no longer exists.
pub(crate) fn stop_with<P, W, E>(
    pid_file: &Utf8Path,
    probe: &P,
    wait: StopWait,
    output: &mut ConsoleOutput<'_, W, E>,
) -> Result<u32, LaunchError>
where
    P: ProcessProbe,
    W: Write,
    E: Write,
{
    let ServerStatus::Running { pid } = status_with(pid_file, probe)? else {
        return Err(LaunchError::NotRunning {
            path: pid_file.to_path_buf(),
        });
    };

    probe.terminate(pid)?;
    info!(target: PROCESS_TARGET, pid, "termination signal sent");
    output.info(&Message::new(codes::INFO_SERVER_SIGNALLED).with_arg(pid));

    let deadline = Instant::now() + wait.timeout;
    loop {
        if !pid_file.exists() || !probe.is_alive(pid)? {
            return Ok(pid);
        }
        if Instant::now() >= deadline {
            return Err(LaunchError::StopTimeout {
                pid,
                timeout: wait.timeout,
            });
        }
        thread::sleep(wait.poll_interval);
    }
}
