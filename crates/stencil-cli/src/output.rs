//! Catalog-rendered console output.

use std::io::Write;

use stencil_messages::{Message, MessageCatalog};

/// Writes catalog messages to the supplied stdout/stderr writers.
///
/// Write failures are ignored: there is nowhere left to report them.
pub(crate) struct ConsoleOutput<'a, W: Write, E: Write> {
    catalog: &'a MessageCatalog,
    stdout: &'a mut W,
    stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> ConsoleOutput<'a, W, E> {
    pub(crate) fn new(catalog: &'a MessageCatalog, stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            catalog,
            stdout,
            stderr,
        }
    }

    pub(crate) fn info(&mut self, message: &Message) {
        let line = self.catalog.render(message);
        let _ = writeln!(self.stdout, "{line}");
        let _ = self.stdout.flush();
    }

    pub(crate) fn error(&mut self, message: &Message) {
        let line = self.catalog.render(message);
        let _ = writeln!(self.stderr, "{line}");
        let _ = self.stderr.flush();
    }

    pub(crate) fn errors<'m>(&mut self, messages: impl IntoIterator<Item = &'m Message>) {
        for message in messages {
            self.error(message);
        }
    }

    pub(crate) fn stdout(&mut self) -> &mut W {
        self.stdout
    }
}
