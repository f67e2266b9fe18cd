//! Structured reporting of lifecycle state transitions.

use std::fmt;

use super::PROCESS_TARGET;

/// States of the `start` state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing has happened yet.
    Idle,
    /// The pid file is being read and its pid probed.
    CheckingPidFile,
    /// A live instance owns the pid file. Terminal.
    AlreadyRunning,
    /// No live instance; the launch proceeds.
    Starting,
    /// A background child is being spawned. Terminal.
    DaemonRelaunching,
    /// The pid file is written and the process waits for a signal.
    RunningForeground,
    /// A signal arrived and cleanup is running. Terminal.
    Terminating,
}

impl LifecycleState {
    /// Stable snake-case name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CheckingPidFile => "checking_pid_file",
            Self::AlreadyRunning => "already_running",
            Self::Starting => "starting",
            Self::DaemonRelaunching => "daemon_relaunching",
            Self::RunningForeground => "running_foreground",
            Self::Terminating => "terminating",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Observer notified on every lifecycle transition.
pub trait LifecycleReporter: Send + Sync {
    /// Invoked after the state machine moves from `from` to `to`.
    fn transition(&self, from: LifecycleState, to: LifecycleState);
}

/// Default reporter that records transitions using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredLifecycleReporter;

impl LifecycleReporter for StructuredLifecycleReporter {
    fn transition(&self, from: LifecycleState, to: LifecycleState) {
        tracing::info!(
            target: PROCESS_TARGET,
            event = "transition",
            from = %from,
            to = %to,
            "lifecycle state changed"
        );
    }
}

/// Tracks the current state and reports every move.
pub(crate) struct StateTracker<'a> {
    current: LifecycleState,
    reporter: &'a dyn LifecycleReporter,
}

impl<'a> StateTracker<'a> {
    pub(crate) fn new(reporter: &'a dyn LifecycleReporter) -> Self {
        Self {
            current: LifecycleState::Idle,
            reporter,
        }
    }

    pub(crate) fn advance(&mut self, next: LifecycleState) {
        self.reporter.transition(self.current, next);
        self.current = next;
    }

    #[cfg(test)]
    pub(crate) const fn current(&self) -> LifecycleState {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording(Mutex<Vec<(LifecycleState, LifecycleState)>>);

    impl LifecycleReporter for Recording {
        fn transition(&self, from: LifecycleState, to: LifecycleState) {
            self.0.lock().expect("lock").push((from, to));
        }
    }

    #[test]
    fn tracker_reports_each_step_from_idle() {
        let reporter = Recording::default();
        let mut tracker = StateTracker::new(&reporter);
        tracker.advance(LifecycleState::CheckingPidFile);
        tracker.advance(LifecycleState::Starting);

        assert_eq!(tracker.current(), LifecycleState::Starting);
        assert_eq!(
            *reporter.0.lock().expect("lock"),
            vec![
                (LifecycleState::Idle, LifecycleState::CheckingPidFile),
                (LifecycleState::CheckingPidFile, LifecycleState::Starting),
            ]
        );
    }
}
