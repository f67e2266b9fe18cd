//! Single-instance lifecycle of the foreground or background server process.
//!
//! `start` walks `Idle → CheckingPidFile → {AlreadyRunning | Starting} →
//! {DaemonRelaunching | RunningForeground} → Terminating`, reporting each
//! transition to a [`LifecycleReporter`]. `status` and `stop` inspect the same
//! pid file from a separate invocation.

use std::time::Duration;

mod control;
mod errors;
mod files;
mod launch;
mod pid_file;
mod probe;
mod relaunch;
mod reporter;
mod shutdown;

pub(crate) use control::{ServerStatus, StopWait, status_with, stop_with};
pub use errors::LaunchError;
#[cfg(test)]
pub(crate) use launch::StartOutcome;
pub(crate) use launch::{ProcessControl, StartRequest, start_with};
pub use probe::{ProcessProbe, SystemProbe};
pub use relaunch::{Relauncher, SystemRelauncher, foreground_arguments};
pub use reporter::{LifecycleReporter, LifecycleState, StructuredLifecycleReporter};
pub use shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::process");

/// Pause before the relaunching parent exits.
pub(crate) const GRACE_PERIOD: Duration = Duration::from_secs(1);
