use std::fmt;

/// Error kind for value-layer errors.
///
/// Mirrors the exception classes a host binding raises for marshalling
/// failures. Driver-side kinds (timeouts, server errors) live in the host
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong host type, unparsable string, unknown field/type name.
    InvalidArgument,
    /// Numeric value outside a fixed-width domain, or overflow.
    Range,
    /// Zero divisor in division or modulo.
    DivideByZero,
    /// Underlying resource unavailable.
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => f.write_str("invalid argument"),
            ErrorKind::Range => f.write_str("range"),
            ErrorKind::DivideByZero => f.write_str("divide by zero"),
            ErrorKind::Runtime => f.write_str("runtime"),
        }
    }
}

/// Value error returned by every fallible constructor, mutator and
/// arithmetic operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    kind: ErrorKind,
    message: String,
}

impl ValueError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::InvalidArgument, message: msg.into() }
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Range, message: msg.into() }
    }

    pub fn divide_by_zero(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::DivideByZero, message: msg.into() }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Runtime, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValueError {}

impl From<std::net::AddrParseError> for ValueError {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<uuid::Error> for ValueError {
    fn from(e: uuid::Error) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind() {
        let err = ValueError::range("Sum is out of range").with_context("smallint add");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "smallint add: Sum is out of range");
    }
}
