//! Error surface of configuration loading and validation.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use stencil_messages::{Message, codes};
use thiserror::Error;

use crate::keys::ConfigKey;

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Key holding the invalid value.
    pub key: ConfigKey,
    /// Catalog message describing the problem.
    pub message: Message,
}

impl FieldError {
    pub(crate) const fn new(key: ConfigKey, message: Message) -> Self {
        Self { key, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.key, self.message)
    }
}

/// Every validation failure found in one pass, in section order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} invalid configuration value(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Number of field errors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the field errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Keys that failed, in report order.
    #[must_use]
    pub fn keys(&self) -> Vec<ConfigKey> {
        self.0.iter().map(|error| error.key).collect()
    }
}

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The working directory could not be captured.
    #[error("failed to determine base directory: {source}")]
    BaseDir {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The configuration file could not be read.
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid YAML of the expected shape.
    #[error("failed to parse configuration file '{path}': {message}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// One or more values failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ConfigError {
    /// Headline catalog message.
    #[must_use]
    pub fn message(&self) -> Message {
        match self {
            Self::BaseDir { source } => Message::new(codes::ERR_BASE_DIR).with_arg(source),
            Self::Read { path, source } => Message::new(codes::ERR_READ_CONFIG_FILE)
                .with_arg(path)
                .with_arg(source),
            Self::Parse { path, message } => Message::new(codes::ERR_PARSE_CONFIG_FILE)
                .with_arg(path)
                .with_arg(message),
            Self::Validation(errors) => {
                Message::new(codes::ERR_VALIDATE_CONFIG).with_arg(errors.count())
            }
        }
    }

    /// Follow-up messages, one per invalid field for validation failures.
    #[must_use]
    pub fn details(&self) -> Vec<Message> {
        match self {
            Self::Validation(errors) => errors.iter().map(|error| error.message.clone()).collect(),
            _ => Vec::new(),
        }
    }
}
