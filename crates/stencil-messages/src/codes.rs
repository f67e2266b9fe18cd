//! Codes for every message the program emits.
//!
//! Ranges: `200xxx` informational, `400xxx` initialisation, `401xxx`
//! configuration validation, `402xxx` process lifecycle. The `Args:` notes list
//! the positional arguments each message expects, in order.

use crate::MessageCode;

// informational
/// Foreground server started. Args: pid, pid file.
pub const INFO_SERVER_START: MessageCode = MessageCode::new(200_001);
/// Foreground server stopped. Args: pid, pid file.
pub const INFO_SERVER_STOP: MessageCode = MessageCode::new(200_002);
/// A live instance was found. Args: pid.
pub const INFO_SERVER_IS_RUNNING: MessageCode = MessageCode::new(200_003);
/// No live instance was found. Args: pid file.
pub const INFO_SERVER_NOT_RUNNING: MessageCode = MessageCode::new(200_004);
/// Background child launched. Args: child pid.
pub const INFO_SERVER_RELAUNCHED: MessageCode = MessageCode::new(200_005);
/// Termination signal delivered by `stop`. Args: pid.
pub const INFO_SERVER_SIGNALLED: MessageCode = MessageCode::new(200_006);

// initialisation
/// Writing help output failed. Args: cause.
pub const ERR_PRINT_HELP_INFO: MessageCode = MessageCode::new(400_001);
/// Configuration initialisation failed as a whole. No args.
pub const ERR_INIT_CONFIG: MessageCode = MessageCode::new(400_002);
/// The base directory could not be determined. Args: cause.
pub const ERR_BASE_DIR: MessageCode = MessageCode::new(400_003);
/// The config file could not be read. Args: path, cause.
pub const ERR_READ_CONFIG_FILE: MessageCode = MessageCode::new(400_004);
/// The config file is malformed. Args: path, cause.
pub const ERR_PARSE_CONFIG_FILE: MessageCode = MessageCode::new(400_005);
/// One or more configuration values are invalid. Args: error count.
pub const ERR_VALIDATE_CONFIG: MessageCode = MessageCode::new(400_006);
/// The logger could not be installed. Args: cause.
pub const ERR_INIT_LOGGER: MessageCode = MessageCode::new(400_007);
/// Rotating the log file failed. Args: log file, cause.
pub const ERR_ROTATE_LOG_FILE: MessageCode = MessageCode::new(400_008);
/// Command-line usage error. Args: clap diagnostic.
pub const ERR_COMMAND_LINE_USAGE: MessageCode = MessageCode::new(400_009);

// validation
/// `daemon` is not a boolean. Args: value.
pub const ERR_NOT_VALID_DAEMON: MessageCode = MessageCode::new(401_001);
/// `log.fileName` is empty. No args.
pub const ERR_EMPTY_LOG_FILE_NAME: MessageCode = MessageCode::new(401_002);
/// `log.fileName` is not a file path. Args: value.
pub const ERR_NOT_VALID_LOG_FILE_NAME: MessageCode = MessageCode::new(401_003);
/// `log.level` is unknown. Args: allowed values, value.
pub const ERR_NOT_VALID_LOG_LEVEL: MessageCode = MessageCode::new(401_004);
/// `log.format` is unknown. Args: allowed values, value.
pub const ERR_NOT_VALID_LOG_FORMAT: MessageCode = MessageCode::new(401_005);
/// `log.maxSize` is out of range. Args: min, max, value.
pub const ERR_NOT_VALID_LOG_MAX_SIZE: MessageCode = MessageCode::new(401_006);
/// `log.maxDays` is out of range. Args: min, max, value.
pub const ERR_NOT_VALID_LOG_MAX_DAYS: MessageCode = MessageCode::new(401_007);
/// `log.maxBackups` is out of range. Args: min, max, value.
pub const ERR_NOT_VALID_LOG_MAX_BACKUPS: MessageCode = MessageCode::new(401_008);
/// `log.rotateOnStartup` is not a boolean. Args: value.
pub const ERR_NOT_VALID_LOG_ROTATE_ON_STARTUP: MessageCode = MessageCode::new(401_009);
/// `log.stdout` is not a boolean. Args: value.
pub const ERR_NOT_VALID_LOG_STDOUT: MessageCode = MessageCode::new(401_010);
/// `server.addr` is not `host:port`. Args: value.
pub const ERR_NOT_VALID_SERVER_ADDR: MessageCode = MessageCode::new(401_011);
/// `server.addr` port is out of range. Args: min, max, port.
pub const ERR_NOT_VALID_SERVER_PORT: MessageCode = MessageCode::new(401_012);
/// `server.pidFile` is not a file path. Args: value.
pub const ERR_NOT_VALID_PID_FILE: MessageCode = MessageCode::new(401_013);
/// `server.readTimeout` is out of range. Args: min, max, value.
pub const ERR_NOT_VALID_SERVER_READ_TIMEOUT: MessageCode = MessageCode::new(401_014);
/// `server.writeTimeout` is out of range. Args: min, max, value.
pub const ERR_NOT_VALID_SERVER_WRITE_TIMEOUT: MessageCode = MessageCode::new(401_015);
/// A numeric key holds a non-integer. Args: key, value.
pub const ERR_NOT_VALID_INTEGER: MessageCode = MessageCode::new(401_016);

// lifecycle
/// Reading the pid file failed. Args: pid file, cause.
pub const ERR_CHECK_SERVER_PID: MessageCode = MessageCode::new(402_001);
/// Probing a recorded pid failed. Args: pid, cause.
pub const ERR_CHECK_SERVER_RUNNING_STATUS: MessageCode = MessageCode::new(402_002);
/// A live instance owns the pid file. Args: pid file, pid.
pub const ERR_SERVER_IS_RUNNING: MessageCode = MessageCode::new(402_003);
/// Spawning the background child failed. Args: program, cause.
pub const ERR_RELAUNCH_DAEMON: MessageCode = MessageCode::new(402_004);
/// Writing the pid file failed. Args: pid file, cause.
pub const ERR_SAVE_PID_TO_FILE: MessageCode = MessageCode::new(402_005);
/// Installing signal handlers failed. Args: cause.
pub const ERR_INSTALL_SIGNAL_HANDLER: MessageCode = MessageCode::new(402_006);
/// Removing the pid file on shutdown failed. Args: pid file, cause.
pub const ERR_REMOVE_PID_FILE: MessageCode = MessageCode::new(402_007);
/// `stop` found no live instance. Args: pid file.
pub const ERR_SERVER_NOT_RUNNING: MessageCode = MessageCode::new(402_008);
/// Delivering the termination signal failed. Args: pid, cause.
pub const ERR_STOP_SERVER: MessageCode = MessageCode::new(402_009);
/// The instance did not exit in time. Args: pid, timeout in ms.
pub const ERR_STOP_TIMEOUT: MessageCode = MessageCode::new(402_010);
/// Resolving the current executable failed. Args: cause.
pub const ERR_CURRENT_EXECUTABLE: MessageCode = MessageCode::new(402_011);

/// Codes registered by [`crate::MessageCatalog::standard`] with the English
/// summary shown when the Fluent wording cannot be resolved.
///
/// The wording itself lives in `locales/en-US/messages.ftl` under
/// `stencil-<code>`.
pub(crate) const STANDARD_MESSAGES: &[(MessageCode, &str)] = &[
    (INFO_SERVER_START, "stencil started successfully"),
    (INFO_SERVER_STOP, "stencil stopped successfully"),
    (INFO_SERVER_IS_RUNNING, "stencil is running"),
    (INFO_SERVER_NOT_RUNNING, "stencil is not running"),
    (INFO_SERVER_RELAUNCHED, "stencil relaunched in background"),
    (INFO_SERVER_SIGNALLED, "termination signal sent to stencil"),
    (ERR_PRINT_HELP_INFO, "got error when printing help information"),
    (ERR_INIT_CONFIG, "init config failed"),
    (ERR_BASE_DIR, "get base dir of stencil failed"),
    (ERR_READ_CONFIG_FILE, "read config file failed"),
    (ERR_PARSE_CONFIG_FILE, "parse config file failed"),
    (ERR_VALIDATE_CONFIG, "validate config failed"),
    (ERR_INIT_LOGGER, "initialize logger failed"),
    (ERR_ROTATE_LOG_FILE, "rotate log file failed"),
    (ERR_COMMAND_LINE_USAGE, "command line usage error"),
    (ERR_NOT_VALID_DAEMON, "daemon is not valid"),
    (ERR_EMPTY_LOG_FILE_NAME, "log file name could not be an empty string"),
    (ERR_NOT_VALID_LOG_FILE_NAME, "log file name is not valid"),
    (ERR_NOT_VALID_LOG_LEVEL, "log level is not valid"),
    (ERR_NOT_VALID_LOG_FORMAT, "log format is not valid"),
    (ERR_NOT_VALID_LOG_MAX_SIZE, "log max size is not valid"),
    (ERR_NOT_VALID_LOG_MAX_DAYS, "log max days is not valid"),
    (ERR_NOT_VALID_LOG_MAX_BACKUPS, "log max backups is not valid"),
    (ERR_NOT_VALID_LOG_ROTATE_ON_STARTUP, "log rotate on startup is not valid"),
    (ERR_NOT_VALID_LOG_STDOUT, "log stdout is not valid"),
    (ERR_NOT_VALID_SERVER_ADDR, "server addr is not a valid address"),
    (ERR_NOT_VALID_SERVER_PORT, "server port is not valid"),
    (ERR_NOT_VALID_PID_FILE, "pid file name is not valid"),
    (ERR_NOT_VALID_SERVER_READ_TIMEOUT, "server read timeout is not valid"),
    (ERR_NOT_VALID_SERVER_WRITE_TIMEOUT, "server write timeout is not valid"),
    (ERR_NOT_VALID_INTEGER, "value must be an integer"),
    (ERR_CHECK_SERVER_PID, "check pid file failed"),
    (ERR_CHECK_SERVER_RUNNING_STATUS, "check server running status failed"),
    (ERR_SERVER_IS_RUNNING, "pid file exists and the server is still running"),
    (ERR_RELAUNCH_DAEMON, "start in background failed"),
    (ERR_SAVE_PID_TO_FILE, "save pid to file failed"),
    (ERR_INSTALL_SIGNAL_HANDLER, "install termination signal handlers failed"),
    (ERR_REMOVE_PID_FILE, "remove pid file failed"),
    (ERR_SERVER_NOT_RUNNING, "server is not running, nothing to stop"),
    (ERR_STOP_SERVER, "send termination signal failed"),
    (ERR_STOP_TIMEOUT, "server did not stop in time"),
    (ERR_CURRENT_EXECUTABLE, "resolve current executable failed"),
];
