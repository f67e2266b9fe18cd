//! Layered configuration for the stencil binaries.
//!
//! Settings are resolved in passes over a loosely typed [`ConfigStore`]:
//! built-in defaults, then an optional YAML file, then `STENCIL_*`
//! environment variables, then command-line flags. Each pass overwrites only
//! the keys it explicitly supplies. The [`Validator`] then checks every
//! section, collecting all violations before reporting, and produces the
//! strongly typed [`Settings`] consumed by the rest of the program.

mod defaults;
mod environment;
mod errors;
mod file;
mod keys;
mod loader;
mod overrides;
mod settings;
mod store;
mod validate;
mod value;

pub use defaults::{
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_LOG_MAX_BACKUPS, DEFAULT_LOG_MAX_DAYS,
    DEFAULT_LOG_MAX_SIZE, DEFAULT_SERVER_ADDR, DEFAULT_SERVER_READ_TIMEOUT,
    DEFAULT_SERVER_WRITE_TIMEOUT, LOG_MAX_BACKUPS_RANGE, LOG_MAX_DAYS_RANGE, LOG_MAX_SIZE_RANGE,
    SERVER_PORT_RANGE, SERVER_READ_TIMEOUT_RANGE, SERVER_WRITE_TIMEOUT_RANGE, default_log_file,
    default_pid_file,
};
pub use environment::{CONFIG_PATH_ENV_VAR, ENV_PREFIX};
pub use errors::{ConfigError, FieldError, ValidationErrors};
pub use keys::{ConfigKey, Section};
pub use loader::{ConfigRequest, LoadedConfig, load_settings};
pub use overrides::CliOverrides;
pub use settings::{LogFormat, LogLevel, LogSettings, ServerAddr, ServerSettings, Settings};
pub use store::{ConfigStore, Layer};
pub use validate::{Validator, is_valid_file_path};
pub use value::ConfigValue;
