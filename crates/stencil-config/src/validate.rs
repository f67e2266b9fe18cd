//! Collect-all validation from [`ConfigStore`] to [`Settings`].

use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use stencil_messages::{Message, MessageCode, codes};
use strum::VariantNames;

use crate::defaults::{
    LOG_MAX_BACKUPS_RANGE, LOG_MAX_DAYS_RANGE, LOG_MAX_SIZE_RANGE, SERVER_PORT_RANGE,
    SERVER_READ_TIMEOUT_RANGE, SERVER_WRITE_TIMEOUT_RANGE,
};
use crate::errors::{FieldError, ValidationErrors};
use crate::keys::ConfigKey;
use crate::settings::{LogFormat, LogLevel, LogSettings, ServerAddr, ServerSettings, Settings};
use crate::store::ConfigStore;
use crate::value::ConfigValue;

/// Returns true when `path` names a file: absolute, free of NUL bytes, not
/// ending in a separator, and with a final file-name component.
#[must_use]
pub fn is_valid_file_path(path: &Utf8Path) -> bool {
    let text = path.as_str();
    path.is_absolute()
        && !text.contains('\0')
        && !text.ends_with(std::path::MAIN_SEPARATOR)
        && !text.ends_with('/')
        && path.file_name().is_some()
}

/// Checks every configuration section and builds [`Settings`].
///
/// Each section reports all of its problems; a value with the wrong type is
/// reported once and its range check is skipped. Keys missing from the store
/// fall back to their defaults.
#[derive(Debug, Clone)]
pub struct Validator {
    base_dir: Utf8PathBuf,
}

impl Validator {
    /// Creates a validator resolving relative paths against `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Validates `daemon`.
    ///
    /// # Errors
    ///
    /// Returns the field errors of the section.
    pub fn validate_daemon(&self, store: &ConfigStore) -> Result<bool, Vec<FieldError>> {
        let store = self.filled(store);
        boolean(&store, ConfigKey::Daemon, codes::ERR_NOT_VALID_DAEMON).map_err(|error| vec![error])
    }

    /// Validates the `log.*` keys.
    ///
    /// # Errors
    ///
    /// Returns every field error of the section.
    pub fn validate_log(&self, store: &ConfigStore) -> Result<LogSettings, Vec<FieldError>> {
        let store = self.filled(store);
        let mut errors = Vec::new();

        let file_name = collect(&mut errors, self.log_file_name(&store));
        let level = collect(&mut errors, log_level(&store));
        let format = collect(&mut errors, log_format(&store));
        let max_size = collect(
            &mut errors,
            bounded(
                &store,
                ConfigKey::LogMaxSize,
                &LOG_MAX_SIZE_RANGE,
                codes::ERR_NOT_VALID_LOG_MAX_SIZE,
            ),
        );
        let max_days = collect(
            &mut errors,
            bounded(
                &store,
                ConfigKey::LogMaxDays,
                &LOG_MAX_DAYS_RANGE,
                codes::ERR_NOT_VALID_LOG_MAX_DAYS,
            ),
        );
        let max_backups = collect(
            &mut errors,
            bounded(
                &store,
                ConfigKey::LogMaxBackups,
                &LOG_MAX_BACKUPS_RANGE,
                codes::ERR_NOT_VALID_LOG_MAX_BACKUPS,
            ),
        );
        let rotate_on_startup = collect(
            &mut errors,
            boolean(
                &store,
                ConfigKey::LogRotateOnStartup,
                codes::ERR_NOT_VALID_LOG_ROTATE_ON_STARTUP,
            ),
        );
        let stdout = collect(
            &mut errors,
            boolean(&store, ConfigKey::LogStdout, codes::ERR_NOT_VALID_LOG_STDOUT),
        );

        match (
            file_name,
            level,
            format,
            max_size,
            max_days,
            max_backups,
            rotate_on_startup,
            stdout,
        ) {
            (
                Some(file_name),
                Some(level),
                Some(format),
                Some(max_size),
                Some(max_days),
                Some(max_backups),
                Some(rotate_on_startup),
                Some(stdout),
            ) => Ok(LogSettings {
                file_name,
                level,
                format,
                max_size_mb: max_size.unsigned_abs(),
                max_days: max_days.unsigned_abs(),
                max_backups: usize::try_from(max_backups.unsigned_abs()).unwrap_or(usize::MAX),
                rotate_on_startup,
                stdout,
            }),
            _ => Err(errors),
        }
    }

    /// Validates the `server.*` keys.
    ///
    /// # Errors
    ///
    /// Returns every field error of the section.
    pub fn validate_server(&self, store: &ConfigStore) -> Result<ServerSettings, Vec<FieldError>> {
        let store = self.filled(store);
        let mut errors = Vec::new();

        let addr = collect(&mut errors, server_addr(&store));
        let pid_file = collect(
            &mut errors,
            self.file_path(
                &store,
                ConfigKey::ServerPidFile,
                codes::ERR_NOT_VALID_PID_FILE,
            ),
        );
        let read_timeout = collect(
            &mut errors,
            bounded(
                &store,
                ConfigKey::ServerReadTimeout,
                &SERVER_READ_TIMEOUT_RANGE,
                codes::ERR_NOT_VALID_SERVER_READ_TIMEOUT,
            ),
        );
        let write_timeout = collect(
            &mut errors,
            bounded(
                &store,
                ConfigKey::ServerWriteTimeout,
                &SERVER_WRITE_TIMEOUT_RANGE,
                codes::ERR_NOT_VALID_SERVER_WRITE_TIMEOUT,
            ),
        );

        match (addr, pid_file, read_timeout, write_timeout) {
            (Some(addr), Some(pid_file), Some(read_timeout), Some(write_timeout)) => {
                Ok(ServerSettings {
                    addr,
                    pid_file,
                    read_timeout: Duration::from_secs(read_timeout.unsigned_abs()),
                    write_timeout: Duration::from_secs(write_timeout.unsigned_abs()),
                })
            }
            _ => Err(errors),
        }
    }

    /// Validates every section, concatenating errors in section order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] holding every problem found.
    pub fn validate(&self, store: &ConfigStore) -> Result<Settings, ValidationErrors> {
        let daemon = self.validate_daemon(store);
        let log = self.validate_log(store);
        let server = self.validate_server(store);

        match (daemon, log, server) {
            (Ok(daemon), Ok(log), Ok(server)) => Ok(Settings {
                daemon,
                log,
                server,
            }),
            (daemon, log, server) => {
                let mut errors = Vec::new();
                errors.extend(daemon.err().unwrap_or_default());
                errors.extend(log.err().unwrap_or_default());
                errors.extend(server.err().unwrap_or_default());
                Err(ValidationErrors(errors))
            }
        }
    }

    fn filled(&self, store: &ConfigStore) -> ConfigStore {
        let mut filled = ConfigStore::new(self.base_dir.clone());
        filled.set_defaults();
        for (key, value, layer) in store.iter() {
            filled.set(key, value.clone(), layer);
        }
        filled
    }

    fn log_file_name(&self, store: &ConfigStore) -> Result<Utf8PathBuf, FieldError> {
        let value = text(store, ConfigKey::LogFileName);
        if value.trim().is_empty() {
            return Err(FieldError::new(
                ConfigKey::LogFileName,
                Message::new(codes::ERR_EMPTY_LOG_FILE_NAME),
            ));
        }
        self.file_path(
            store,
            ConfigKey::LogFileName,
            codes::ERR_NOT_VALID_LOG_FILE_NAME,
        )
    }

    fn file_path(
        &self,
        store: &ConfigStore,
        key: ConfigKey,
        code: MessageCode,
    ) -> Result<Utf8PathBuf, FieldError> {
        let value = text(store, key);
        let trimmed = value.trim();
        let resolved = self.base_dir.join(trimmed);
        if trimmed.is_empty() || !is_valid_file_path(&resolved) {
            return Err(FieldError::new(key, Message::new(code).with_arg(&value)));
        }
        Ok(resolved)
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    result.map_err(|error| errors.push(error)).ok()
}

fn value(store: &ConfigStore, key: ConfigKey) -> ConfigValue {
    store
        .get(key)
        .cloned()
        .unwrap_or_else(|| ConfigValue::from(""))
}

fn text(store: &ConfigStore, key: ConfigKey) -> String {
    value(store, key).as_text()
}

fn boolean(store: &ConfigStore, key: ConfigKey, code: MessageCode) -> Result<bool, FieldError> {
    let value = value(store, key);
    value
        .as_bool()
        .ok_or_else(|| FieldError::new(key, Message::new(code).with_arg(&value)))
}

fn bounded(
    store: &ConfigStore,
    key: ConfigKey,
    range: &RangeInclusive<i64>,
    code: MessageCode,
) -> Result<i64, FieldError> {
    let value = value(store, key);
    let Some(number) = value.as_integer() else {
        return Err(FieldError::new(
            key,
            Message::new(codes::ERR_NOT_VALID_INTEGER)
                .with_arg(key)
                .with_arg(&value),
        ));
    };
    if range.contains(&number) {
        Ok(number)
    } else {
        Err(range_error(key, range, code, number))
    }
}

fn range_error(
    key: ConfigKey,
    range: &RangeInclusive<i64>,
    code: MessageCode,
    value: impl std::fmt::Display,
) -> FieldError {
    FieldError::new(
        key,
        Message::new(code)
            .with_arg(range.start())
            .with_arg(range.end())
            .with_arg(value),
    )
}

fn log_level(store: &ConfigStore) -> Result<LogLevel, FieldError> {
    let value = text(store, ConfigKey::LogLevel);
    LogLevel::from_str(value.trim()).map_err(|_| {
        FieldError::new(
            ConfigKey::LogLevel,
            Message::new(codes::ERR_NOT_VALID_LOG_LEVEL)
                .with_arg(LogLevel::VARIANTS.join(", "))
                .with_arg(&value),
        )
    })
}

fn log_format(store: &ConfigStore) -> Result<LogFormat, FieldError> {
    let value = text(store, ConfigKey::LogFormat);
    LogFormat::from_str(value.trim()).map_err(|_| {
        FieldError::new(
            ConfigKey::LogFormat,
            Message::new(codes::ERR_NOT_VALID_LOG_FORMAT)
                .with_arg(LogFormat::VARIANTS.join(", "))
                .with_arg(&value),
        )
    })
}

fn server_addr(store: &ConfigStore) -> Result<ServerAddr, FieldError> {
    let key = ConfigKey::ServerAddr;
    let value = text(store, key);
    let malformed = || {
        FieldError::new(
            key,
            Message::new(codes::ERR_NOT_VALID_SERVER_ADDR).with_arg(&value),
        )
    };

    let parts: Vec<&str> = value.trim().split(':').collect();
    let [host, port] = parts.as_slice() else {
        return Err(malformed());
    };
    let port_number: i64 = port.parse().map_err(|_| malformed())?;
    let out_of_range = || {
        range_error(
            key,
            &SERVER_PORT_RANGE,
            codes::ERR_NOT_VALID_SERVER_PORT,
            port_number,
        )
    };
    if !SERVER_PORT_RANGE.contains(&port_number) {
        return Err(out_of_range());
    }
    let port = u16::try_from(port_number).map_err(|_| out_of_range())?;
    Ok(ServerAddr {
        host: (*host).to_owned(),
        port,
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use stencil_messages::MessageCatalog;

    use super::*;
    use crate::store::Layer;

    const BASE: &str = "/srv/stencil";

    #[fixture]
    fn store() -> ConfigStore {
        let mut store = ConfigStore::new(BASE);
        store.set_defaults();
        store
    }

    fn validator() -> Validator {
        Validator::new(BASE)
    }

    fn with(mut store: ConfigStore, key: ConfigKey, value: impl Into<ConfigValue>) -> ConfigStore {
        store.set(key, value, Layer::CommandLine);
        store
    }

    #[rstest]
    fn defaults_validate(store: ConfigStore) {
        let settings = match validator().validate(&store) {
            Ok(settings) => settings,
            Err(errors) => panic!("defaults should validate: {errors:?}"),
        };
        assert!(!settings.daemon);
        assert_eq!(settings.log.file_name, Utf8PathBuf::from("/srv/stencil/log/run.log"));
        assert_eq!(settings.log.level, LogLevel::Info);
        assert_eq!(settings.log.format, LogFormat::Text);
        assert_eq!(settings.log.max_size_mb, 100);
        assert_eq!(settings.log.max_backups, 5);
        assert_eq!(settings.server.addr.to_string(), "0.0.0.0:6090");
        assert_eq!(settings.server.pid_file, Utf8PathBuf::from("/srv/stencil/stencil.pid"));
        assert_eq!(settings.server.read_timeout, Duration::from_secs(5));
        assert_eq!(settings.server.write_timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let store = ConfigStore::new(BASE);
        assert!(validator().validate(&store).is_ok());
    }

    #[rstest]
    #[case("yes", true)]
    #[case("F", false)]
    #[case("1", true)]
    fn daemon_accepts_boolean_spellings(
        store: ConfigStore,
        #[case] input: &str,
        #[case] expected: bool,
    ) {
        let store = with(store, ConfigKey::Daemon, input);
        assert_eq!(validator().validate_daemon(&store), Ok(expected));
    }

    #[rstest]
    fn daemon_rejects_other_text(store: ConfigStore) {
        let store = with(store, ConfigKey::Daemon, "sometimes");
        let errors = validator().validate_daemon(&store).err().unwrap_or_default();
        assert_eq!(
            errors,
            vec![FieldError::new(
                ConfigKey::Daemon,
                Message::new(codes::ERR_NOT_VALID_DAEMON).with_arg("sometimes"),
            )]
        );
    }

    #[rstest]
    #[case("0", Some(codes::ERR_NOT_VALID_LOG_MAX_SIZE))]
    #[case("1", None)]
    #[case("10240", None)]
    #[case("10241", Some(codes::ERR_NOT_VALID_LOG_MAX_SIZE))]
    #[case("big", Some(codes::ERR_NOT_VALID_INTEGER))]
    fn max_size_bounds(
        store: ConfigStore,
        #[case] input: &str,
        #[case] expected: Option<MessageCode>,
    ) {
        let store = with(store, ConfigKey::LogMaxSize, input);
        let codes: Vec<_> = validator()
            .validate_log(&store)
            .err()
            .unwrap_or_default()
            .iter()
            .map(|error| error.message.code())
            .collect();
        assert_eq!(codes, expected.into_iter().collect::<Vec<_>>());
    }

    #[rstest]
    fn max_backups_uses_its_own_bounds(store: ConfigStore) {
        let store = with(store, ConfigKey::LogMaxBackups, 1000_i64);
        let settings = validator().validate_log(&store);
        assert_eq!(settings.map(|log| log.max_backups), Ok(1000));
    }

    #[rstest]
    fn bool_is_not_an_integer(store: ConfigStore) {
        let store = with(store, ConfigKey::ServerReadTimeout, true);
        let errors = validator().validate_server(&store).err().unwrap_or_default();
        assert_eq!(
            errors,
            vec![FieldError::new(
                ConfigKey::ServerReadTimeout,
                Message::new(codes::ERR_NOT_VALID_INTEGER)
                    .with_arg("server.readTimeout")
                    .with_arg("true"),
            )]
        );
    }

    #[rstest]
    #[case(":8080", Ok((String::new(), 8080)))]
    #[case("localhost:1", Ok(("localhost".to_owned(), 1)))]
    #[case("localhost", Err(codes::ERR_NOT_VALID_SERVER_ADDR))]
    #[case("::1:8080", Err(codes::ERR_NOT_VALID_SERVER_ADDR))]
    #[case("host:http", Err(codes::ERR_NOT_VALID_SERVER_ADDR))]
    #[case("host:0", Err(codes::ERR_NOT_VALID_SERVER_PORT))]
    #[case("host:65536", Err(codes::ERR_NOT_VALID_SERVER_PORT))]
    fn server_addr_rules(
        store: ConfigStore,
        #[case] input: &str,
        #[case] expected: Result<(String, u16), MessageCode>,
    ) {
        let store = with(store, ConfigKey::ServerAddr, input);
        let outcome = validator()
            .validate_server(&store)
            .map(|server| (server.addr.host, server.addr.port))
            .map_err(|errors| errors[0].message.code());
        assert_eq!(outcome, expected);
    }

    #[rstest]
    fn malformed_addr_is_the_only_error_on_defaults(store: ConfigStore) {
        let store = with(store, ConfigKey::ServerAddr, "bad-addr");
        let errors = validator().validate(&store).err().unwrap_or_default();
        assert_eq!(errors.keys(), vec![ConfigKey::ServerAddr]);
        let message = &errors.iter().next().expect("one error").message;
        assert_eq!(message.code(), codes::ERR_NOT_VALID_SERVER_ADDR);
        let line = MessageCatalog::standard().render(message);
        assert!(line.starts_with("stencil-401011: "), "{line}");
        assert!(line.contains("bad-addr is not a valid address"), "{line}");
    }

    #[rstest]
    fn relative_paths_resolve_against_base(store: ConfigStore) {
        let store = with(store, ConfigKey::ServerPidFile, "run/stencil.pid");
        let server = validator().validate_server(&store);
        assert_eq!(
            server.map(|server| server.pid_file),
            Ok(Utf8PathBuf::from("/srv/stencil/run/stencil.pid"))
        );
    }

    #[rstest]
    #[case("   ", codes::ERR_EMPTY_LOG_FILE_NAME)]
    #[case("logs/", codes::ERR_NOT_VALID_LOG_FILE_NAME)]
    fn log_file_name_rules(store: ConfigStore, #[case] input: &str, #[case] code: MessageCode) {
        let store = with(store, ConfigKey::LogFileName, input);
        let errors = validator().validate_log(&store).err().unwrap_or_default();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message.code(), code);
    }

    #[rstest]
    fn level_error_lists_allowed_values(store: ConfigStore) {
        let store = with(store, ConfigKey::LogLevel, "loud");
        let errors = validator().validate_log(&store).err().unwrap_or_default();
        assert_eq!(
            errors[0].message,
            Message::new(codes::ERR_NOT_VALID_LOG_LEVEL)
                .with_arg("debug, info, warn, error, fatal")
                .with_arg("loud")
        );
    }

    #[rstest]
    fn collects_every_error_in_section_order(store: ConfigStore) {
        let store = with(store, ConfigKey::Daemon, "nope");
        let store = with(store, ConfigKey::LogFormat, "xml");
        let store = with(store, ConfigKey::LogMaxDays, 0_i64);
        let store = with(store, ConfigKey::ServerWriteTimeout, 61_i64);

        let errors = validator().validate(&store).err().unwrap_or_default();
        assert_eq!(
            errors.keys(),
            vec![
                ConfigKey::Daemon,
                ConfigKey::LogFormat,
                ConfigKey::LogMaxDays,
                ConfigKey::ServerWriteTimeout,
            ]
        );
    }

    #[rstest]
    fn validation_is_idempotent(store: ConfigStore) {
        let store = with(store, ConfigKey::LogLevel, "verbose");
        assert_eq!(validator().validate(&store), validator().validate(&store));
    }

    #[rstest]
    #[case("/var/run/stencil.pid", true)]
    #[case("relative.pid", false)]
    #[case("/var/run/", false)]
    #[case("/", false)]
    #[case("/var/run/..", false)]
    fn file_path_rules(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_file_path(Utf8Path::new(input)), expected);
    }
}
