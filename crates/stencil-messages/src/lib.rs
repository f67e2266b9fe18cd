//! Numeric message catalog shared by the stencil crates.
//!
//! Every status line and error shown to an operator is identified by a
//! [`MessageCode`]. Components never format user-facing text themselves;
//! they build a [`Message`] (code plus positional arguments) and hand it to a
//! [`MessageCatalog`], which resolves the wording from an embedded Fluent
//! resource. The catalog is an ordinary value constructed at startup and
//! passed by reference, so tests can build their own catalogs without
//! touching global state.
//!
//! ```
//! use stencil_messages::{Message, MessageCatalog, codes};
//!
//! let catalog = MessageCatalog::standard();
//! let message = Message::new(codes::INFO_SERVER_IS_RUNNING).with_arg(4242);
//! assert_eq!(
//!     catalog.render(&message),
//!     "stencil-200003: stencil is running. pid: 4242"
//! );
//! ```

mod catalog;
pub mod codes;
mod message;

pub use catalog::{CatalogError, DEFAULT_HEADER, MessageCatalog, MessageCatalogBuilder};
pub use message::{Message, MessageCode};
