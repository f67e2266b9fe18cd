//! Loosely typed key/value store populated in layered passes.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use strum::Display;

use crate::defaults::{
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_LOG_MAX_BACKUPS, DEFAULT_LOG_MAX_DAYS,
    DEFAULT_LOG_MAX_SIZE, DEFAULT_SERVER_ADDR, DEFAULT_SERVER_READ_TIMEOUT,
    DEFAULT_SERVER_WRITE_TIMEOUT, default_log_file, default_pid_file,
};
use crate::environment;
use crate::errors::ConfigError;
use crate::file::{self, FileDocument};
use crate::keys::ConfigKey;
use crate::overrides::CliOverrides;
use crate::value::ConfigValue;

/// Source that last wrote a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Layer {
    /// Built-in default.
    #[strum(serialize = "default")]
    Default,
    /// Configuration file.
    #[strum(serialize = "file")]
    File,
    /// `STENCIL_*` environment variable.
    #[strum(serialize = "environment")]
    Environment,
    /// Command-line flag.
    #[strum(serialize = "command line")]
    CommandLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    value: ConfigValue,
    layer: Layer,
}

/// Configuration values keyed by [`ConfigKey`], with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    base_dir: Utf8PathBuf,
    entries: BTreeMap<ConfigKey, Entry>,
}

impl ConfigStore {
    /// Creates an empty store bound to `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Creates an empty store bound to the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BaseDir`] when the working directory cannot be
    /// read or is not valid UTF-8.
    pub fn from_current_dir() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::BaseDir { source })?;
        let base_dir = Utf8PathBuf::from_path_buf(cwd).map_err(|path| ConfigError::BaseDir {
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("working directory '{}' is not valid UTF-8", path.display()),
            ),
        })?;
        Ok(Self::new(base_dir))
    }

    /// Directory relative paths are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Writes every key's built-in default.
    pub fn set_defaults(&mut self) {
        let defaults = [
            (ConfigKey::Daemon, ConfigValue::Bool(false)),
            (
                ConfigKey::LogFileName,
                ConfigValue::from(default_log_file(&self.base_dir).into_string()),
            ),
            (
                ConfigKey::LogLevel,
                ConfigValue::from(DEFAULT_LOG_LEVEL.to_string()),
            ),
            (
                ConfigKey::LogFormat,
                ConfigValue::from(DEFAULT_LOG_FORMAT.to_string()),
            ),
            (ConfigKey::LogMaxSize, ConfigValue::from(DEFAULT_LOG_MAX_SIZE)),
            (ConfigKey::LogMaxDays, ConfigValue::from(DEFAULT_LOG_MAX_DAYS)),
            (
                ConfigKey::LogMaxBackups,
                ConfigValue::from(DEFAULT_LOG_MAX_BACKUPS),
            ),
            (ConfigKey::LogRotateOnStartup, ConfigValue::Bool(false)),
            (ConfigKey::LogStdout, ConfigValue::Bool(false)),
            (ConfigKey::ServerAddr, ConfigValue::from(DEFAULT_SERVER_ADDR)),
            (
                ConfigKey::ServerPidFile,
                ConfigValue::from(default_pid_file(&self.base_dir).into_string()),
            ),
            (
                ConfigKey::ServerReadTimeout,
                ConfigValue::from(DEFAULT_SERVER_READ_TIMEOUT),
            ),
            (
                ConfigKey::ServerWriteTimeout,
                ConfigValue::from(DEFAULT_SERVER_WRITE_TIMEOUT),
            ),
        ];
        for (key, value) in defaults {
            self.set(key, value, Layer::Default);
        }
    }

    /// Stores `value` under `key`, recording `layer` as its source.
    pub fn set(&mut self, key: ConfigKey, value: impl Into<ConfigValue>, layer: Layer) {
        self.entries.insert(
            key,
            Entry {
                value: value.into(),
                layer,
            },
        );
    }

    /// Current value of `key`.
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> Option<&ConfigValue> {
        self.entries.get(&key).map(|entry| &entry.value)
    }

    /// Layer that last wrote `key`.
    #[must_use]
    pub fn layer(&self, key: ConfigKey) -> Option<Layer> {
        self.entries.get(&key).map(|entry| entry.layer)
    }

    /// Iterates over `(key, value, layer)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, &ConfigValue, Layer)> {
        self.entries
            .iter()
            .map(|(key, entry)| (*key, &entry.value, entry.layer))
    }

    /// Overlays the keys present in a YAML file.
    ///
    /// An empty `path` is a no-op. Relative paths are resolved against the
    /// base directory. A file holding only whitespace or comments is an empty
    /// overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid document.
    pub fn load_from_file(&mut self, path: &str) -> Result<(), ConfigError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let path = self.base_dir.join(trimmed);
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        if file::is_blank(&content) {
            return Ok(());
        }
        let document: FileDocument =
            serde_saphyr::from_str(&content).map_err(|error| ConfigError::Parse {
                path,
                message: error.to_string(),
            })?;
        for (key, value) in document.into_entries() {
            self.set(key, value, Layer::File);
        }
        Ok(())
    }

    /// Overlays `STENCIL_*` variables as text values.
    ///
    /// Unrelated and non-UTF-8 variables are ignored.
    pub fn overlay_environment<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        for (name, value) in vars {
            let Some(key) = name.to_str().and_then(environment::key_for_var) else {
                continue;
            };
            let Ok(text) = value.into_string() else {
                continue;
            };
            self.set(key, text, Layer::Environment);
        }
    }

    /// Overlays the flags supplied on the command line.
    pub fn override_from_cli(&mut self, overrides: &CliOverrides) {
        for (key, value) in overrides.entries() {
            self.set(key, value, Layer::CommandLine);
        }
    }
}
