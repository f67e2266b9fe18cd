use strum::{Display, EnumIter, IntoStaticStr};

/// Top-level configuration sections, validated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Section {
    /// The `daemon` switch.
    Daemon,
    /// Logger parameters under `log.*`.
    Log,
    /// Server parameters under `server.*`.
    Server,
}

/// Every key held by the [`crate::ConfigStore`].
///
/// The display form is the dotted key used in the YAML file and in messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr,
)]
pub enum ConfigKey {
    /// Whether `start` relaunches itself in the background.
    #[strum(serialize = "daemon")]
    Daemon,
    /// Path of the log file.
    #[strum(serialize = "log.fileName")]
    LogFileName,
    /// Minimum level written to the log.
    #[strum(serialize = "log.level")]
    LogLevel,
    /// Log line format.
    #[strum(serialize = "log.format")]
    LogFormat,
    /// Size in megabytes at which the log rotates.
    #[strum(serialize = "log.maxSize")]
    LogMaxSize,
    /// Age in days after which rotated logs are removed.
    #[strum(serialize = "log.maxDays")]
    LogMaxDays,
    /// Number of rotated logs kept.
    #[strum(serialize = "log.maxBackups")]
    LogMaxBackups,
    /// Rotate an existing log file when the logger opens it.
    #[strum(serialize = "log.rotateOnStartup")]
    LogRotateOnStartup,
    /// Mirror log output to stdout.
    #[strum(serialize = "log.stdout")]
    LogStdout,
    /// Listen address as `host:port`.
    #[strum(serialize = "server.addr")]
    ServerAddr,
    /// Path of the pid file.
    #[strum(serialize = "server.pidFile")]
    ServerPidFile,
    /// Read timeout in seconds.
    #[strum(serialize = "server.readTimeout")]
    ServerReadTimeout,
    /// Write timeout in seconds.
    #[strum(serialize = "server.writeTimeout")]
    ServerWriteTimeout,
}

impl ConfigKey {
    /// Dotted key name, e.g. `log.maxSize`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Section the key belongs to.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::Daemon => Section::Daemon,
            Self::LogFileName
            | Self::LogLevel
            | Self::LogFormat
            | Self::LogMaxSize
            | Self::LogMaxDays
            | Self::LogMaxBackups
            | Self::LogRotateOnStartup
            | Self::LogStdout => Section::Log,
            Self::ServerAddr
            | Self::ServerPidFile
            | Self::ServerReadTimeout
            | Self::ServerWriteTimeout => Section::Server,
        }
    }

    /// Environment variable that overrides the key.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Daemon => "STENCIL_DAEMON",
            Self::LogFileName => "STENCIL_LOG_FILE_NAME",
            Self::LogLevel => "STENCIL_LOG_LEVEL",
            Self::LogFormat => "STENCIL_LOG_FORMAT",
            Self::LogMaxSize => "STENCIL_LOG_MAX_SIZE",
            Self::LogMaxDays => "STENCIL_LOG_MAX_DAYS",
            Self::LogMaxBackups => "STENCIL_LOG_MAX_BACKUPS",
            Self::LogRotateOnStartup => "STENCIL_LOG_ROTATE_ON_STARTUP",
            Self::LogStdout => "STENCIL_LOG_STDOUT",
            Self::ServerAddr => "STENCIL_SERVER_ADDR",
            Self::ServerPidFile => "STENCIL_SERVER_PID_FILE",
            Self::ServerReadTimeout => "STENCIL_SERVER_READ_TIMEOUT",
            Self::ServerWriteTimeout => "STENCIL_SERVER_WRITE_TIMEOUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn names_use_dotted_camel_case() {
        assert_eq!(ConfigKey::LogRotateOnStartup.name(), "log.rotateOnStartup");
        assert_eq!(ConfigKey::ServerPidFile.to_string(), "server.pidFile");
    }

    #[test]
    fn every_key_has_a_prefixed_environment_variable() {
        for key in ConfigKey::iter() {
            assert!(
                key.env_var().starts_with(crate::ENV_PREFIX),
                "{key} uses {}",
                key.env_var()
            );
        }
    }

    #[test]
    fn sections_follow_key_prefix() {
        for key in ConfigKey::iter() {
            let prefix = key.name().split('.').next().unwrap_or_default();
            assert_eq!(prefix, key.section().to_string());
        }
    }
}
