use std::fmt;

/// Numeric identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageCode(u32);

impl MessageCode {
    /// Wraps a raw numeric code.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw numeric code.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A catalog code together with the positional arguments for its wording.
///
/// Arguments are captured as strings when the message is built so messages
/// can be compared, stored in error sets, and rendered later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    code: MessageCode,
    args: Vec<String>,
}

impl Message {
    /// Creates a message without arguments.
    #[must_use]
    pub const fn new(code: MessageCode) -> Self {
        Self {
            code,
            args: Vec::new(),
        }
    }

    /// Appends the next positional argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl fmt::Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Catalog code of the message.
    #[must_use]
    pub const fn code(&self) -> MessageCode {
        self.code
    }

    /// Positional arguments in order: `$arg0`, `$arg1`, ...
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Catalog-free rendering: the code followed by its arguments.
impl fmt::Display for Message {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "message {}", self.code)?;
        if !self.args.is_empty() {
            write!(formatter, " [{}]", self.args.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_arguments_in_order() {
        let message = Message::new(MessageCode::new(7))
            .with_arg("first")
            .with_arg(2);
        assert_eq!(message.args(), ["first", "2"]);
        assert_eq!(message.code().value(), 7);
    }

    #[test]
    fn displays_code_and_arguments_without_catalog() {
        let message = Message::new(MessageCode::new(401_011)).with_arg("bad-addr");
        assert_eq!(message.to_string(), "message 401011 [bad-addr]");
        assert_eq!(
            Message::new(MessageCode::new(1)).to_string(),
            "message 1"
        );
    }
}
