use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::files::atomic_write;
use super::probe::ProcessProbe;

/// What a pid file says about the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PidFileStatus {
    /// No pid file exists.
    Absent,
    /// The file does not hold a positive integer.
    Stale {
        /// Trimmed file contents.
        contents: String,
    },
    /// The recorded process no longer exists.
    Dead {
        /// Pid recorded in the file.
        pid: u32,
    },
    /// The recorded process exists.
    Live {
        /// Pid recorded in the file.
        pid: u32,
    },
}

/// Reads `path` and probes the recorded pid.
pub(crate) fn inspect<P>(path: &Utf8Path, probe: &P) -> Result<PidFileStatus, LaunchError>
where
    P: ProcessProbe + ?Sized,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(PidFileStatus::Absent),
        Err(source) => {
            return Err(LaunchError::PidRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let trimmed = contents.trim();
    let Some(pid) = trimmed.parse::<u32>().ok().filter(|pid| *pid > 0) else {
        return Ok(PidFileStatus::Stale {
            contents: trimmed.to_owned(),
        });
    };
    if probe.is_alive(pid)? {
        Ok(PidFileStatus::Live { pid })
    } else {
        Ok(PidFileStatus::Dead { pid })
    }
}

/// Pid file owned by the running foreground process.
///
/// Dropping the guard without [`PidFileGuard::release`] still removes the file
/// and logs any failure.
#[derive(Debug)]
pub(crate) struct PidFileGuard {
    path: Utf8PathBuf,
    released: bool,
}

impl PidFileGuard {
    /// Records `pid` in `path`, replacing any stale content.
    pub(crate) fn create(path: &Utf8Path, pid: u32) -> Result<Self, LaunchError> {
        atomic_write(path, format!("{pid}\n").as_bytes()).map_err(|source| {
            LaunchError::PidWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(
            target: PROCESS_TARGET,
            pid,
            file = %path,
            "pid file written"
        );
        Ok(Self {
            path: path.to_path_buf(),
            released: false,
        })
    }

    pub(crate) fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Removes the pid file. A file already gone counts as removed.
    pub(crate) fn release(mut self) -> Result<(), LaunchError> {
        self.released = true;
        remove(&self.path)
    }
}

impl Drop for PidFileGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(error) = remove(&self.path) {
            warn!(
                target: PROCESS_TARGET,
                file = %self.path,
                error = %error,
                "failed to remove pid file"
            );
        }
    }
}

fn remove(path: &Utf8Path) -> Result<(), LaunchError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(LaunchError::PidRemove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    struct FixedProbe(bool);

    impl ProcessProbe for FixedProbe {
        fn is_alive(&self, _pid: u32) -> Result<bool, LaunchError> {
            Ok(self.0)
        }

        fn terminate(&self, _pid: u32) -> Result<(), LaunchError> {
            Ok(())
        }
    }

    struct Workspace {
        _dir: TempDir,
        pid_file: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        Workspace {
            pid_file: root.join("stencil.pid"),
            _dir: dir,
        }
    }

    #[rstest]
    fn missing_file_is_absent(workspace: Workspace) {
        let status = inspect(&workspace.pid_file, &FixedProbe(true)).expect("inspect");
        assert_eq!(status, PidFileStatus::Absent);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-pid\n")]
    #[case("0\n")]
    #[case("-12\n")]
    fn unparsable_content_is_stale(workspace: Workspace, #[case] contents: &str) {
        fs::write(&workspace.pid_file, contents).expect("write pid file");
        let status = inspect(&workspace.pid_file, &FixedProbe(true)).expect("inspect");
        assert!(matches!(status, PidFileStatus::Stale { .. }), "{status:?}");
    }

    #[rstest]
    #[case(true, PidFileStatus::Live { pid: 321 })]
    #[case(false, PidFileStatus::Dead { pid: 321 })]
    fn recorded_pid_is_probed(
        workspace: Workspace,
        #[case] alive: bool,
        #[case] expected: PidFileStatus,
    ) {
        fs::write(&workspace.pid_file, " 321 \n").expect("write pid file");
        let status = inspect(&workspace.pid_file, &FixedProbe(alive)).expect("inspect");
        assert_eq!(status, expected);
    }

    #[rstest]
    fn unreadable_path_is_an_error(workspace: Workspace) {
        fs::create_dir(&workspace.pid_file).expect("create directory at pid path");
        let result = inspect(&workspace.pid_file, &FixedProbe(false));
        assert!(matches!(result, Err(LaunchError::PidRead { .. })));
    }

    #[rstest]
    fn guard_writes_and_releases(workspace: Workspace) {
        let guard = PidFileGuard::create(&workspace.pid_file, 99).expect("create pid file");
        assert_eq!(
            fs::read_to_string(guard.path()).expect("read pid file"),
            "99\n"
        );
        guard.release().expect("release pid file");
        assert!(!workspace.pid_file.exists());
    }

    #[rstest]
    fn dropping_guard_removes_file(workspace: Workspace) {
        drop(PidFileGuard::create(&workspace.pid_file, 5).expect("create pid file"));
        assert!(!workspace.pid_file.exists());
    }
}
