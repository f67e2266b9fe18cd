//! Shared test doubles for the CLI runtime tests.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::sync::{Arc, Condvar, Mutex};

use camino::{Utf8Path, Utf8PathBuf};
use stencil_config::{
    CliOverrides, ConfigError, ConfigRequest, LoadedConfig, Settings, load_settings,
};
use tempfile::TempDir;

use crate::config::ConfigLoader;
use crate::process::{
    LaunchError, LifecycleReporter, LifecycleState, ProcessProbe, Relauncher, ShutdownError,
    ShutdownSignal,
};

/// Temporary base directory holding the pid and log files of one test.
pub(crate) struct Workspace {
    _dir: TempDir,
    pub(crate) base_dir: Utf8PathBuf,
}

impl Workspace {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let base_dir =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        Self {
            _dir: dir,
            base_dir,
        }
    }

    /// Settings resolved from defaults against this workspace.
    pub(crate) fn settings(&self) -> Settings {
        load_settings(&ConfigRequest {
            base_dir: self.base_dir.clone(),
            ..ConfigRequest::default()
        })
        .expect("default settings are valid")
        .settings
    }
}

/// Loads configuration against a fixed base directory and environment.
pub(crate) struct StaticConfigLoader {
    base_dir: Utf8PathBuf,
    environment: Vec<(OsString, OsString)>,
}

impl StaticConfigLoader {
    pub(crate) fn new(base_dir: &Utf8Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            environment: Vec::new(),
        }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, overrides: &CliOverrides) -> Result<LoadedConfig, ConfigError> {
        load_settings(&ConfigRequest {
            base_dir: self.base_dir.clone(),
            overrides: overrides.clone(),
            environment: self.environment.clone(),
        })
    }
}

/// Shutdown signal triggered from the test, optionally before the wait.
///
/// When a watch path is set, `wait` records that file's contents so tests can
/// observe the pid file while the run is blocked.
#[derive(Clone)]
pub(crate) struct TestShutdownSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
    armed: Arc<Mutex<usize>>,
    watch: Option<Utf8PathBuf>,
    observed: Arc<Mutex<Option<String>>>,
}

impl TestShutdownSignal {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(false), Condvar::new())),
            armed: Arc::new(Mutex::new(0)),
            watch: None,
            observed: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn pretriggered(watch: &Utf8Path) -> Self {
        let signal = Self {
            watch: Some(watch.to_path_buf()),
            ..Self::new()
        };
        signal.trigger();
        signal
    }

    pub(crate) fn trigger(&self) {
        let (lock, cvar) = &*self.inner;
        let mut triggered = lock.lock().expect("shutdown mutex poisoned");
        *triggered = true;
        cvar.notify_all();
    }

    pub(crate) fn armed(&self) -> usize {
        *self.armed.lock().expect("armed mutex poisoned")
    }

    /// Contents of the watched file when `wait` was entered.
    pub(crate) fn observed(&self) -> Option<String> {
        self.observed.lock().expect("observed mutex poisoned").clone()
    }
}

impl ShutdownSignal for TestShutdownSignal {
    fn arm(&self) -> Result<(), ShutdownError> {
        *self.armed.lock().expect("armed mutex poisoned") += 1;
        Ok(())
    }

    fn wait(&self) -> Result<(), ShutdownError> {
        if let Some(path) = &self.watch {
            *self.observed.lock().expect("observed mutex poisoned") = fs::read_to_string(path).ok();
        }
        let (lock, cvar) = &*self.inner;
        let mut triggered = lock.lock().expect("shutdown mutex poisoned");
        while !*triggered {
            triggered = cvar
                .wait(triggered)
                .expect("shutdown mutex poisoned during wait");
        }
        Ok(())
    }
}

/// Relauncher that records its arguments instead of spawning.
#[derive(Clone, Default)]
pub(crate) struct RecordingRelauncher {
    calls: Arc<Mutex<Vec<Vec<OsString>>>>,
}

pub(crate) const RELAUNCHED_CHILD_PID: u32 = 4242;

impl RecordingRelauncher {
    pub(crate) fn calls(&self) -> Vec<Vec<OsString>> {
        self.calls.lock().expect("relauncher mutex poisoned").clone()
    }
}

impl Relauncher for RecordingRelauncher {
    fn relaunch(&self, arguments: &[OsString]) -> Result<u32, LaunchError> {
        self.calls
            .lock()
            .expect("relauncher mutex poisoned")
            .push(arguments.to_vec());
        Ok(RELAUNCHED_CHILD_PID)
    }
}

/// Probe over an in-memory set of live pids.
///
/// `terminate` marks the pid dead, standing in for a server that exits on
/// `SIGTERM`.
#[derive(Clone, Default)]
pub(crate) struct FakeProbe {
    alive: Arc<Mutex<BTreeSet<u32>>>,
    terminated: Arc<Mutex<Vec<u32>>>,
}

impl FakeProbe {
    pub(crate) fn mark_alive(&self, pid: u32) {
        self.alive.lock().expect("probe mutex poisoned").insert(pid);
    }

    pub(crate) fn terminated(&self) -> Vec<u32> {
        self.terminated.lock().expect("probe mutex poisoned").clone()
    }
}

impl ProcessProbe for FakeProbe {
    fn is_alive(&self, pid: u32) -> Result<bool, LaunchError> {
        Ok(self.alive.lock().expect("probe mutex poisoned").contains(&pid))
    }

    fn terminate(&self, pid: u32) -> Result<(), LaunchError> {
        self.alive.lock().expect("probe mutex poisoned").remove(&pid);
        self.terminated
            .lock()
            .expect("probe mutex poisoned")
            .push(pid);
        Ok(())
    }
}

/// Reporter that records every lifecycle transition.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    transitions: Mutex<Vec<(LifecycleState, LifecycleState)>>,
}

impl RecordingReporter {
    /// States entered, in order.
    pub(crate) fn visited(&self) -> Vec<LifecycleState> {
        self.transitions
            .lock()
            .expect("reporter mutex poisoned")
            .iter()
            .map(|(_, to)| *to)
            .collect()
    }
}

impl LifecycleReporter for RecordingReporter {
    fn transition(&self, from: LifecycleState, to: LifecycleState) {
        self.transitions
            .lock()
            .expect("reporter mutex poisoned")
            .push((from, to));
    }
}
