use std::ops::RangeInclusive;

use camino::{Utf8Path, Utf8PathBuf};

use crate::settings::{LogFormat, LogLevel};

/// Directory below the base directory that holds the default log file.
pub const DEFAULT_LOG_DIR: &str = "log";

/// File name of the default log file.
pub const DEFAULT_LOG_FILE_NAME: &str = "run.log";

/// File name of the default pid file.
pub const DEFAULT_PID_FILE_NAME: &str = "stencil.pid";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Default log output format.
pub const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Text;

/// Default size in megabytes at which the log file rotates.
pub const DEFAULT_LOG_MAX_SIZE: i64 = 100;

/// Default number of days a rotated log file is kept.
pub const DEFAULT_LOG_MAX_DAYS: i64 = 7;

/// Default number of rotated log files kept.
pub const DEFAULT_LOG_MAX_BACKUPS: i64 = 5;

/// Default listen address of the server.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:6090";

/// Default read timeout in seconds.
pub const DEFAULT_SERVER_READ_TIMEOUT: i64 = 5;

/// Default write timeout in seconds.
pub const DEFAULT_SERVER_WRITE_TIMEOUT: i64 = 10;

/// Accepted values of `log.maxSize`, in megabytes.
pub const LOG_MAX_SIZE_RANGE: RangeInclusive<i64> = 1..=10_240;

/// Accepted values of `log.maxDays`.
pub const LOG_MAX_DAYS_RANGE: RangeInclusive<i64> = 1..=365;

/// Accepted values of `log.maxBackups`.
pub const LOG_MAX_BACKUPS_RANGE: RangeInclusive<i64> = 1..=1_000;

/// Accepted TCP ports for `server.addr`.
pub const SERVER_PORT_RANGE: RangeInclusive<i64> = 1..=65_535;

/// Accepted values of `server.readTimeout`, in seconds.
pub const SERVER_READ_TIMEOUT_RANGE: RangeInclusive<i64> = 1..=60;

/// Accepted values of `server.writeTimeout`, in seconds.
pub const SERVER_WRITE_TIMEOUT_RANGE: RangeInclusive<i64> = 1..=60;

/// Default log file below `base_dir`.
#[must_use]
pub fn default_log_file(base_dir: &Utf8Path) -> Utf8PathBuf {
    base_dir.join(DEFAULT_LOG_DIR).join(DEFAULT_LOG_FILE_NAME)
}

/// Default pid file below `base_dir`.
#[must_use]
pub fn default_pid_file(base_dir: &Utf8Path) -> Utf8PathBuf {
    base_dir.join(DEFAULT_PID_FILE_NAME)
}
