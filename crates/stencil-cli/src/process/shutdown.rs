use std::io;
use std::sync::{Mutex, PoisonError};

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::info;

use super::PROCESS_TARGET;

/// Termination signals that end a foreground run.
pub const TERMINATION_SIGNALS: [i32; 4] = [SIGTERM, SIGINT, SIGQUIT, SIGHUP];

/// Abstraction over shutdown notification mechanisms.
pub trait ShutdownSignal: Send + Sync {
    /// Starts capturing termination signals without blocking.
    ///
    /// Called before the pid file is written so a signal arriving early still
    /// triggers cleanup.
    fn arm(&self) -> Result<(), ShutdownError>;

    /// Blocks until shutdown should proceed.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Shutdown listener that waits for `SIGTERM`, `SIGINT`, `SIGQUIT`, or `SIGHUP`.
#[derive(Default)]
pub struct SystemShutdownSignal {
    signals: Mutex<Option<Signals>>,
}

impl SystemShutdownSignal {
    /// Builds an unarmed listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn arm(&self) -> Result<(), ShutdownError> {
        let mut slot = self.signals.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            let signals = Signals::new(TERMINATION_SIGNALS)
                .map_err(|source| ShutdownError::Install { source })?;
            *slot = Some(signals);
        }
        Ok(())
    }

    fn wait(&self) -> Result<(), ShutdownError> {
        self.arm()?;
        let mut slot = self.signals.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(signals) = slot.as_mut()
            && let Some(signal) = signals.forever().next()
        {
            info!(
                target: PROCESS_TARGET,
                signal,
                "shutdown signal received"
            );
        }
        Ok(())
    }
}
