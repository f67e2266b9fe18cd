use clap::Args;

use crate::keys::ConfigKey;
use crate::value::ConfigValue;

/// Command-line flags overriding configuration keys.
///
/// Every flag is optional and captured as text: `None` leaves the store
/// untouched, and malformed values are reported by the validator together
/// with every other problem instead of aborting argument parsing.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Path to a YAML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
    /// Relaunch `start` in the background.
    #[arg(long, global = true, value_name = "BOOL")]
    pub daemon: Option<String>,
    /// Log file path.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<String>,
    /// Log level: debug, info, warn, error, or fatal.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
    /// Log format: text or json.
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,
    /// Size in megabytes at which the log file rotates.
    #[arg(long, global = true, value_name = "MB")]
    pub log_max_size: Option<String>,
    /// Days a rotated log file is kept.
    #[arg(long, global = true, value_name = "DAYS")]
    pub log_max_days: Option<String>,
    /// Number of rotated log files kept.
    #[arg(long, global = true, value_name = "COUNT")]
    pub log_max_backups: Option<String>,
    /// Rotate an existing log file at startup.
    #[arg(long, global = true, value_name = "BOOL")]
    pub log_rotate_on_startup: Option<String>,
    /// Mirror log output to stdout.
    #[arg(long, global = true, value_name = "BOOL")]
    pub log_stdout: Option<String>,
    /// Server listen address as host:port.
    #[arg(long, global = true, value_name = "ADDR")]
    pub server_addr: Option<String>,
    /// Pid file path.
    #[arg(long, global = true, value_name = "PATH")]
    pub server_pid_file: Option<String>,
    /// Server read timeout in seconds.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub server_read_timeout: Option<String>,
    /// Server write timeout in seconds.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub server_write_timeout: Option<String>,
}

impl CliOverrides {
    /// Keys supplied on the command line.
    pub(crate) fn entries(&self) -> Vec<(ConfigKey, ConfigValue)> {
        [
            (ConfigKey::Daemon, &self.daemon),
            (ConfigKey::LogFileName, &self.log_file),
            (ConfigKey::LogLevel, &self.log_level),
            (ConfigKey::LogFormat, &self.log_format),
            (ConfigKey::LogMaxSize, &self.log_max_size),
            (ConfigKey::LogMaxDays, &self.log_max_days),
            (ConfigKey::LogMaxBackups, &self.log_max_backups),
            (ConfigKey::LogRotateOnStartup, &self.log_rotate_on_startup),
            (ConfigKey::LogStdout, &self.log_stdout),
            (ConfigKey::ServerAddr, &self.server_addr),
            (ConfigKey::ServerPidFile, &self.server_pid_file),
            (ConfigKey::ServerReadTimeout, &self.server_read_timeout),
            (ConfigKey::ServerWriteTimeout, &self.server_write_timeout),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|text| (key, ConfigValue::from(text.as_str())))
        })
        .collect()
    }
}
