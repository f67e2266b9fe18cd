use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

use super::errors::LaunchError;

/// Probes and signals processes recorded in a pid file.
pub trait ProcessProbe: Send + Sync {
    /// Reports whether `pid` names an existing process.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::CheckProcess`] when the kernel reports anything
    /// other than success, `EPERM`, or `ESRCH`.
    fn is_alive(&self, pid: u32) -> Result<bool, LaunchError>;

    /// Asks `pid` to terminate with `SIGTERM`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Signal`] when the signal cannot be delivered.
    fn terminate(&self, pid: u32) -> Result<(), LaunchError>;
}

/// Probe backed by `kill(2)`.
///
/// Liveness only proves that some process owns the pid; a recycled pid
/// belonging to an unrelated program also counts as alive.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    fn is_alive(&self, pid: u32) -> Result<bool, LaunchError> {
        let Some(target) = to_pid(pid) else {
            return Ok(false);
        };
        match kill(target, None) {
            Ok(()) | Err(Errno::EPERM) => Ok(true),
            Err(Errno::ESRCH | Errno::ECHILD) => Ok(false),
            Err(errno) => Err(LaunchError::CheckProcess { pid, source: errno }),
        }
    }

    fn terminate(&self, pid: u32) -> Result<(), LaunchError> {
        let target = to_pid(pid).ok_or(LaunchError::Signal {
            pid,
            source: Errno::ESRCH,
        })?;
        kill(target, Signal::SIGTERM).map_err(|errno| LaunchError::Signal { pid, source: errno })
    }
}

/// Pid 0 and values beyond `i32::MAX` never name a single process.
fn to_pid(pid: u32) -> Option<Pid> {
    i32::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .map(Pid::from_raw)
}
