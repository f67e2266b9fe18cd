//! Size-based log rotation with numbered backups.
//!
//! The active file is `<file>`; rotated copies are `<file>.1` (newest) up to
//! `<file>.N` (oldest). Backups older than the retention age are pruned
//! whenever the writer opens or rotates.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use camino::{Utf8Path, Utf8PathBuf};
use stencil_config::LogSettings;

/// Rotation limits derived from `log.maxSize`, `log.maxBackups`, and `log.maxDays`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size in bytes at which the active file rotates.
    pub max_bytes: u64,
    /// Number of numbered backups kept.
    pub max_backups: usize,
    /// Age after which a backup is deleted.
    pub max_age: Duration,
}

impl From<&LogSettings> for RotationPolicy {
    fn from(settings: &LogSettings) -> Self {
        Self {
            max_bytes: settings.max_size_bytes(),
            max_backups: settings.max_backups,
            max_age: settings.max_age(),
        }
    }
}

#[derive(Debug)]
struct ActiveFile {
    file: File,
    written: u64,
}

/// Appending writer that rotates its file once it would exceed the size limit.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: Utf8PathBuf,
    policy: RotationPolicy,
    active: Mutex<ActiveFile>,
}

impl RotatingFileWriter {
    /// Opens `path` for appending, creating parent directories.
    ///
    /// With `rotate_on_startup`, a non-empty existing file is moved to
    /// `<file>.1` first.
    ///
    /// # Errors
    ///
    /// Returns the IO error raised while creating, rotating, or opening files.
    pub fn open(
        path: &Utf8Path,
        policy: RotationPolicy,
        rotate_on_startup: bool,
    ) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let existing = fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
        if rotate_on_startup && existing > 0 {
            shift_backups(path, policy.max_backups)?;
        }
        prune_expired(path, policy)?;
        let file = open_append(path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            policy,
            active: Mutex::new(ActiveFile { file, written }),
        })
    }

    /// Path of the active log file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn rotate_locked(&self, active: &mut ActiveFile) -> io::Result<()> {
        active.file.flush()?;
        shift_backups(&self.path, self.policy.max_backups)?;
        prune_expired(&self.path, self.policy)?;
        active.file = open_append(&self.path)?;
        active.written = 0;
        Ok(())
    }
}

impl Write for &RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let incoming = u64::try_from(buf.len()).unwrap_or(u64::MAX);
        if active.written > 0 && active.written.saturating_add(incoming) > self.policy.max_bytes {
            self.rotate_locked(&mut active)?;
        }
        let count = active.file.write(buf)?;
        active.written = active
            .written
            .saturating_add(u64::try_from(count).unwrap_or(u64::MAX));
        Ok(count)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        active.file.flush()
    }
}

fn open_append(path: &Utf8Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn backup_path(path: &Utf8Path, index: usize) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}.{index}"))
}

/// Moves `<file>` to `<file>.1`, shifting older backups up by one and
/// dropping whatever falls past `max_backups`.
fn shift_backups(path: &Utf8Path, max_backups: usize) -> io::Result<()> {
    if max_backups == 0 {
        return remove_if_present(path);
    }
    remove_if_present(&backup_path(path, max_backups))?;
    for index in (1..max_backups).rev() {
        let from = backup_path(path, index);
        if from.exists() {
            fs::rename(&from, backup_path(path, index + 1))?;
        }
    }
    if path.exists() {
        fs::rename(path, backup_path(path, 1))?;
    }
    Ok(())
}

fn prune_expired(path: &Utf8Path, policy: RotationPolicy) -> io::Result<()> {
    let now = SystemTime::now();
    for index in 1..=policy.max_backups {
        let backup = backup_path(path, index);
        let Ok(modified) = fs::metadata(&backup).and_then(|meta| meta.modified()) else {
            continue;
        };
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age > policy.max_age {
            remove_if_present(&backup)?;
        }
    }
    Ok(())
}

fn remove_if_present(path: &Utf8Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
        _ => Ok(()),
    }
}
