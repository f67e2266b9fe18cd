//! YAML document shape of the configuration file.

use serde::Deserialize;

use crate::keys::ConfigKey;
use crate::value::ConfigValue;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileDocument {
    daemon: Option<ConfigValue>,
    log: Option<LogSection>,
    server: Option<ServerSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogSection {
    file_name: Option<ConfigValue>,
    level: Option<ConfigValue>,
    format: Option<ConfigValue>,
    max_size: Option<ConfigValue>,
    max_days: Option<ConfigValue>,
    max_backups: Option<ConfigValue>,
    rotate_on_startup: Option<ConfigValue>,
    stdout: Option<ConfigValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerSection {
    addr: Option<ConfigValue>,
    pid_file: Option<ConfigValue>,
    read_timeout: Option<ConfigValue>,
    write_timeout: Option<ConfigValue>,
}

impl FileDocument {
    /// Keys present in the document, in key order.
    pub(crate) fn into_entries(self) -> Vec<(ConfigKey, ConfigValue)> {
        let log = self.log.unwrap_or_default();
        let server = self.server.unwrap_or_default();
        [
            (ConfigKey::Daemon, self.daemon),
            (ConfigKey::LogFileName, log.file_name),
            (ConfigKey::LogLevel, log.level),
            (ConfigKey::LogFormat, log.format),
            (ConfigKey::LogMaxSize, log.max_size),
            (ConfigKey::LogMaxDays, log.max_days),
            (ConfigKey::LogMaxBackups, log.max_backups),
            (ConfigKey::LogRotateOnStartup, log.rotate_on_startup),
            (ConfigKey::LogStdout, log.stdout),
            (ConfigKey::ServerAddr, server.addr),
            (ConfigKey::ServerPidFile, server.pid_file),
            (ConfigKey::ServerReadTimeout, server.read_timeout),
            (ConfigKey::ServerWriteTimeout, server.write_timeout),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }
}

/// True when the text holds nothing but whitespace and `#` comments.
pub(crate) fn is_blank(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}
