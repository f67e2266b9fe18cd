//! Fluent-backed resolution of message codes.
//!
//! Each registered code maps to the Fluent id `<header>-<code>` and an English
//! summary. Wording comes from the embedded en-US resource; when the Fluent
//! pipeline cannot be built, or an id is missing, the summary is shown with the
//! arguments appended so the line still carries every detail.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use ortho_config::{FluentLocalizer, LocalizationArgs, Localizer, NoOpLocalizer};
use thiserror::Error;

use crate::codes::STANDARD_MESSAGES;
use crate::{Message, MessageCode};

/// Prefix placed before the code of every rendered line.
pub const DEFAULT_HEADER: &str = "stencil";

/// Embedded en-US Fluent catalogue for the standard codes.
pub(crate) static STENCIL_EN_US: &str = include_str!("../locales/en-US/messages.ftl");

/// Fluent variable names for positional arguments: `{ $arg0 }`, `{ $arg1 }`, ...
const ARG_NAMES: [&str; 6] = ["arg0", "arg1", "arg2", "arg3", "arg4", "arg5"];

/// Bidi isolation marks Fluent wraps around interpolated values.
const ISOLATION_MARKS: [char; 2] = ['\u{2068}', '\u{2069}'];

/// Errors raised while registering codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The code is already registered; registrations never overwrite.
    #[error("message code {code} is already registered as '{existing}'")]
    DuplicateCode {
        /// Code that was registered twice.
        code: MessageCode,
        /// Summary kept from the first registration.
        existing: String,
    },
}

/// Mutable stage of a catalog; freeze it with [`MessageCatalogBuilder::build`].
#[derive(Debug, Clone)]
pub struct MessageCatalogBuilder {
    header: String,
    resources: Vec<&'static str>,
    summaries: BTreeMap<MessageCode, String>,
}

impl MessageCatalogBuilder {
    /// Starts an empty catalog whose lines are prefixed with `header`.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            resources: Vec::new(),
            summaries: BTreeMap::new(),
        }
    }

    /// Starts from the codes in [`crate::codes`] and the embedded en-US wording.
    #[must_use]
    pub fn standard() -> Self {
        let summaries = STANDARD_MESSAGES
            .iter()
            .map(|(code, summary)| (*code, (*summary).to_owned()))
            .collect();
        Self {
            header: DEFAULT_HEADER.to_owned(),
            resources: vec![STENCIL_EN_US],
            summaries,
        }
    }

    /// Adds a Fluent resource whose messages are named `<header>-<code>`.
    pub fn resource(&mut self, source: &'static str) -> &mut Self {
        self.resources.push(source);
        self
    }

    /// Registers `code` with the English `summary` used when Fluent has no
    /// wording for it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCode`] when `code` is already
    /// registered. The existing summary is kept.
    pub fn register(
        &mut self,
        code: MessageCode,
        summary: impl Into<String>,
    ) -> Result<&mut Self, CatalogError> {
        match self.summaries.entry(code) {
            Entry::Occupied(entry) => Err(CatalogError::DuplicateCode {
                code,
                existing: entry.get().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(summary.into());
                Ok(self)
            }
        }
    }

    /// Freezes the registrations and loads the Fluent resources.
    ///
    /// Falls back to [`NoOpLocalizer`] when the resources fail to load, so
    /// every line renders from its summary instead.
    #[must_use]
    pub fn build(self) -> MessageCatalog {
        let localizer: Box<dyn Localizer> =
            match FluentLocalizer::with_en_us_defaults(self.resources) {
                Ok(localizer) => Box::new(localizer),
                Err(_) => Box::new(NoOpLocalizer),
            };
        MessageCatalog {
            header: self.header,
            summaries: self.summaries,
            localizer,
        }
    }
}

/// Immutable mapping from [`MessageCode`] to localized console lines.
pub struct MessageCatalog {
    header: String,
    summaries: BTreeMap<MessageCode, String>,
    localizer: Box<dyn Localizer>,
}

impl MessageCatalog {
    /// Catalog holding every code the stencil binaries use.
    #[must_use]
    pub fn standard() -> Self {
        MessageCatalogBuilder::standard().build()
    }

    /// Formats `code` with positional `args`.
    ///
    /// Unknown codes render a fallback line that still names the code and
    /// arguments.
    #[must_use]
    pub fn resolve(&self, code: MessageCode, args: &[&dyn fmt::Display]) -> String {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        self.resolve_strings(code, &args)
    }

    /// Formats a structured [`Message`].
    #[must_use]
    pub fn render(&self, message: &Message) -> String {
        self.resolve_strings(message.code(), message.args())
    }

    fn resolve_strings(&self, code: MessageCode, args: &[String]) -> String {
        let text = match self.summaries.get(&code) {
            Some(summary) => {
                let id = format!("{}-{code}", self.header);
                let fluent_args: LocalizationArgs<'_> = ARG_NAMES
                    .iter()
                    .copied()
                    .zip(args.iter().map(|arg| arg.as_str().into()))
                    .collect();
                let fallback = with_args(summary, args);
                self.localizer.message(&id, Some(&fluent_args), &fallback)
            }
            None => with_args("unknown message code", args),
        };
        let text: String = text
            .chars()
            .filter(|character| !ISOLATION_MARKS.contains(character))
            .collect();
        format!("{}-{code}: {text}", self.header)
    }
}

impl fmt::Debug for MessageCatalog {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MessageCatalog")
            .field("header", &self.header)
            .field("codes", &self.summaries.len())
            .finish_non_exhaustive()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn with_args(text: &str, args: &[String]) -> String {
    if args.is_empty() {
        text.to_owned()
    } else {
        format!("{text}, args: [{}]", args.join(", "))
    }
}
