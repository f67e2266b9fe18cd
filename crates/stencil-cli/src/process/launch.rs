//! Sequences the `start` state machine.

use std::ffi::OsString;
use std::io::Write;
use std::thread;
use std::time::Duration;

use stencil_config::Settings;
use stencil_messages::{Message, codes};
use tracing::{info, warn};

use crate::output::ConsoleOutput;

use super::errors::LaunchError;
use super::pid_file::{PidFileGuard, PidFileStatus, inspect};
use super::probe::{ProcessProbe, SystemProbe};
use super::relaunch::{Relauncher, SystemRelauncher, foreground_arguments};
use super::reporter::{LifecycleReporter, LifecycleState, StateTracker};
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};
use super::{GRACE_PERIOD, PROCESS_TARGET};

/// Process-level collaborators needed to control the server lifecycle.
pub(crate) struct ProcessControl<S, R, P> {
    pub(crate) shutdown: S,
    pub(crate) relauncher: R,
    pub(crate) probe: P,
    pub(crate) grace_period: Duration,
}

impl ProcessControl<SystemShutdownSignal, SystemRelauncher, SystemProbe> {
    /// Collaborators backed by real signals, processes, and `kill(2)`.
    pub(crate) fn system() -> Self {
        Self {
            shutdown: SystemShutdownSignal::new(),
            relauncher: SystemRelauncher,
            probe: SystemProbe,
            grace_period: GRACE_PERIOD,
        }
    }
}

/// Inputs of one `start` invocation.
pub(crate) struct StartRequest<'a> {
    pub(crate) settings: &'a Settings,
    /// Full original argv, including argv\[0\].
    pub(crate) arguments: &'a [OsString],
    pub(crate) pid: u32,
}

/// How a successful `start` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartOutcome {
    /// A background child was spawned; this process should exit.
    Relaunched { child: u32 },
    /// The foreground run received a termination signal and cleaned up.
    Stopped { pid: u32 },
}

/// Runs `start` with injected collaborators.
pub(crate) fn start_with<S, R, P, W, E>(
    request: &StartRequest<'_>,
    control: &ProcessControl<S, R, P>,
    reporter: &dyn LifecycleReporter,
    output: &mut ConsoleOutput<'_, W, E>,
) -> Result<StartOutcome, LaunchError>
where
    S: ShutdownSignal,
    R: Relauncher,
    P: ProcessProbe,
    W: Write,
    E: Write,
{
    let pid_file = &request.settings.server.pid_file;
    let mut state = StateTracker::new(reporter);

    state.advance(LifecycleState::CheckingPidFile);
    match inspect(pid_file, &control.probe)? {
        PidFileStatus::Live { pid } => {
            state.advance(LifecycleState::AlreadyRunning);
            return Err(LaunchError::AlreadyRunning {
                path: pid_file.clone(),
                pid,
            });
        }
        PidFileStatus::Dead { pid } => warn!(
            target: PROCESS_TARGET,
            pid,
            file = %pid_file,
            "recorded process is gone; replacing pid file"
        ),
        PidFileStatus::Stale { contents } => warn!(
            target: PROCESS_TARGET,
            file = %pid_file,
            contents = %contents,
            "pid file does not hold a pid; replacing it"
        ),
        PidFileStatus::Absent => {}
    }
    state.advance(LifecycleState::Starting);

    if request.settings.daemon {
        state.advance(LifecycleState::DaemonRelaunching);
        let child = control
            .relauncher
            .relaunch(&foreground_arguments(request.arguments))?;
        output.info(&Message::new(codes::INFO_SERVER_RELAUNCHED).with_arg(child));
        // The child is not supervised; it may still fail after this pause.
        thread::sleep(control.grace_period);
        return Ok(StartOutcome::Relaunched { child });
    }

    control.shutdown.arm()?;
    let guard = PidFileGuard::create(pid_file, request.pid)?;
    state.advance(LifecycleState::RunningForeground);
    info!(
        target: PROCESS_TARGET,
        pid = request.pid,
        file = %guard.path(),
        addr = %request.settings.server.addr,
        "server running in foreground"
    );
    output.info(
        &Message::new(codes::INFO_SERVER_START)
            .with_arg(request.pid)
            .with_arg(pid_file),
    );

    control.shutdown.wait()?;
    state.advance(LifecycleState::Terminating);
    if let Err(error) = guard.release() {
        warn!(
            target: PROCESS_TARGET,
            error = %error,
            "pid file cleanup failed"
        );
        output.error(&error.message());
    }
    info!(
        target: PROCESS_TARGET,
        pid = request.pid,
        "shutdown sequence completed"
    );
    output.info(
        &Message::new(codes::INFO_SERVER_STOP)
            .with_arg(request.pid)
            .with_arg(pid_file),
    );
    Ok(StartOutcome::Stopped { pid: request.pid })
}
