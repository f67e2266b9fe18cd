//! Structured logging initialisation from validated [`LogSettings`].

mod rotation;

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use once_cell::sync::OnceCell;
use stencil_config::{LogFormat, LogSettings};
use stencil_messages::{Message, codes};
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter, writer::MakeWriterExt};

pub use rotation::{RotatingFileWriter, RotationPolicy};

static TELEMETRY_GUARD: OnceCell<Utf8PathBuf> = OnceCell::new();

/// Handle returned once logging is installed.
#[derive(Debug, Clone)]
pub struct TelemetryHandle {
    log_file: Utf8PathBuf,
}

impl TelemetryHandle {
    /// File receiving log output.
    #[must_use]
    pub fn log_file(&self) -> &Utf8PathBuf {
        &self.log_file
    }
}

/// Errors encountered while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The log file or its directory could not be opened.
    #[error("failed to open log file '{path}': {source}")]
    Open {
        /// Log file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Rotating the existing log file at startup failed.
    #[error("failed to rotate log file '{path}': {source}")]
    Rotate {
        /// Log file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Failed to parse the level filter.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install logging subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

impl TelemetryError {
    /// Catalog message describing the failure.
    #[must_use]
    pub fn message(&self) -> Message {
        match self {
            Self::Rotate { path, source } => Message::new(codes::ERR_ROTATE_LOG_FILE)
                .with_arg(path)
                .with_arg(source),
            Self::Open { .. } | Self::Filter(_) | Self::Subscriber(_) => {
                Message::new(codes::ERR_INIT_LOGGER).with_arg(self)
            }
        }
    }
}

/// Installs the global subscriber on first use.
///
/// Later calls return a handle for the file chosen by the first call without
/// touching global state.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the log file cannot be prepared or the
/// subscriber cannot be installed.
pub fn initialise(settings: &LogSettings) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(settings).map(|()| settings.file_name.clone()))
        .map(|log_file| TelemetryHandle {
            log_file: log_file.clone(),
        })
}

fn install_subscriber(settings: &LogSettings) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(settings.level.as_filter_directive())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let writer = open_writer(settings)?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(writer)
        // Log files and tee'd stdout are both read outside a terminal.
        .with_ansi(false)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match settings.format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Text => Box::new(builder.compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn open_writer(settings: &LogSettings) -> Result<BoxMakeWriter, TelemetryError> {
    let policy = RotationPolicy::from(settings);
    let path = &settings.file_name;
    let file = if settings.rotate_on_startup {
        RotatingFileWriter::open(path, policy, true).map_err(|source| TelemetryError::Rotate {
            path: path.clone(),
            source,
        })?
    } else {
        RotatingFileWriter::open(path, policy, false).map_err(|source| TelemetryError::Open {
            path: path.clone(),
            source,
        })?
    };
    let file = Arc::new(file);
    Ok(if settings.stdout {
        BoxMakeWriter::new(file.and(io::stdout))
    } else {
        BoxMakeWriter::new(file)
    })
}
