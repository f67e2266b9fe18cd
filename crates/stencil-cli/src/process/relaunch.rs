use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use tracing::info;

use super::PROCESS_TARGET;
use super::errors::LaunchError;

const DAEMON_FLAG: &str = "--daemon";
const DAEMON_FLAG_FALSE: &str = "--daemon=false";

/// Starts a detached copy of the current program.
pub trait Relauncher: Send + Sync {
    /// Spawns the program with `arguments` (excluding argv\[0\]) and returns
    /// the child pid without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::CurrentExecutable`] or [`LaunchError::Relaunch`]
    /// when the child cannot be started.
    fn relaunch(&self, arguments: &[OsString]) -> Result<u32, LaunchError>;
}

/// Relauncher that re-executes `std::env::current_exe()` in its own process
/// group with the standard streams detached.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRelauncher;

impl Relauncher for SystemRelauncher {
    fn relaunch(&self, arguments: &[OsString]) -> Result<u32, LaunchError> {
        let program =
            env::current_exe().map_err(|source| LaunchError::CurrentExecutable { source })?;
        let child = Command::new(&program)
            .args(arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| LaunchError::Relaunch {
                program: program.display().to_string(),
                source,
            })?;
        let pid = child.id();
        info!(
            target: PROCESS_TARGET,
            pid,
            program = %program.display(),
            "relaunched in background"
        );
        Ok(pid)
    }
}

/// Rewrites the invocation so the relaunched child runs in the foreground.
///
/// `argv[0]` is dropped. `--daemon=<value>` and `--daemon <value>` become
/// false; when no such flag is present (daemon mode came from the file or the
/// environment) `--daemon=false` is appended so the child cannot relaunch
/// again.
#[must_use]
pub fn foreground_arguments(args: &[OsString]) -> Vec<OsString> {
    let mut rewritten = Vec::with_capacity(args.len() + 1);
    let mut rewrote_flag = false;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let text = arg.to_str();
        if text == Some(DAEMON_FLAG) {
            rewritten.push(arg.clone());
            if iter.next().is_some() {
                rewritten.push(OsString::from("false"));
            }
            rewrote_flag = true;
        } else if text.is_some_and(|value| value.starts_with("--daemon=")) {
            rewritten.push(OsString::from(DAEMON_FLAG_FALSE));
            rewrote_flag = true;
        } else {
            rewritten.push(arg.clone());
        }
    }
    if !rewrote_flag {
        rewritten.push(OsStr::new(DAEMON_FLAG_FALSE).to_os_string());
    }
    rewritten
}
