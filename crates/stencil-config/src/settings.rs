use std::fmt;
use std::time::Duration;

use camino::Utf8PathBuf;
use strum::{Display, EnumString, VariantNames};

/// Minimum severity written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumString, Display, VariantNames)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal operational events.
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
    /// Failures that end the process. Filtered as `error`.
    Fatal,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_filter_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error | Self::Fatal => "error",
        }
    }
}

/// Supported log line formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, VariantNames)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable single line output.
    Text,
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
}

/// Validated listen address.
///
/// The host is kept verbatim; an empty host means all interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    /// Host part, possibly empty.
    pub host: String,
    /// TCP port in `1..=65535`.
    pub port: u16,
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.host, self.port)
    }
}

/// Validated logger parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Absolute path of the active log file.
    pub file_name: Utf8PathBuf,
    /// Minimum level written.
    pub level: LogLevel,
    /// Line format.
    pub format: LogFormat,
    /// Rotation threshold in megabytes.
    pub max_size_mb: u64,
    /// Age in days after which backups are pruned.
    pub max_days: u64,
    /// Number of backups kept.
    pub max_backups: usize,
    /// Rotate a non-empty file when the logger opens it.
    pub rotate_on_startup: bool,
    /// Mirror output to stdout.
    pub stdout: bool,
}

impl LogSettings {
    /// Rotation threshold in bytes.
    #[must_use]
    pub const fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    /// Maximum backup age.
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_days.saturating_mul(24 * 60 * 60))
    }
}

/// Validated server parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Listen address.
    pub addr: ServerAddr,
    /// Absolute path of the pid file.
    pub pid_file: Utf8PathBuf,
    /// Read timeout.
    pub read_timeout: Duration,
    /// Write timeout.
    pub write_timeout: Duration,
}

/// Fully validated configuration consumed by the rest of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Relaunch in the background on `start`.
    pub daemon: bool,
    /// Logger parameters.
    pub log: LogSettings,
    /// Server parameters.
    pub server: ServerSettings,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Warn", LogLevel::Warn)]
    #[case("fatal", LogLevel::Fatal)]
    fn levels_parse_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(LogLevel::from_str(input).ok(), Some(expected));
    }

    #[test]
    fn fatal_filters_as_error() {
        assert_eq!(LogLevel::Fatal.as_filter_directive(), "error");
    }

    #[test]
    fn formats_reject_unknown_names() {
        assert!(LogFormat::from_str("compact").is_err());
        assert_eq!(LogFormat::from_str("JSON").ok(), Some(LogFormat::Json));
    }

    #[test]
    fn address_renders_empty_host() {
        let addr = ServerAddr {
            host: String::new(),
            port: 8080,
        };
        assert_eq!(addr.to_string(), ":8080");
    }
}
