use std::fmt;

use cql_types::{ErrorKind, ValueError};

/// Exception classes raised to host scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExceptionKind {
    InvalidArgument,
    Domain,
    Runtime,
    Timeout,
    Logic,
    Range,
    DivideByZero,
    Execution,
    ReadTimeout,
    WriteTimeout,
    Unavailable,
    Truncate,
    Validation,
    InvalidQuery,
    InvalidSyntax,
    Unauthorized,
    Unprepared,
    Configuration,
    AlreadyExists,
    Authentication,
    Protocol,
    Server,
    IsBootstrapping,
    Overloaded,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 24] = [
        ExceptionKind::InvalidArgument,
        ExceptionKind::Domain,
        ExceptionKind::Runtime,
        ExceptionKind::Timeout,
        ExceptionKind::Logic,
        ExceptionKind::Range,
        ExceptionKind::DivideByZero,
        ExceptionKind::Execution,
        ExceptionKind::ReadTimeout,
        ExceptionKind::WriteTimeout,
        ExceptionKind::Unavailable,
        ExceptionKind::Truncate,
        ExceptionKind::Validation,
        ExceptionKind::InvalidQuery,
        ExceptionKind::InvalidSyntax,
        ExceptionKind::Unauthorized,
        ExceptionKind::Unprepared,
        ExceptionKind::Configuration,
        ExceptionKind::AlreadyExists,
        ExceptionKind::Authentication,
        ExceptionKind::Protocol,
        ExceptionKind::Server,
        ExceptionKind::IsBootstrapping,
        ExceptionKind::Overloaded,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            ExceptionKind::InvalidArgument => "Cassandra\\Exception\\InvalidArgumentException",
            ExceptionKind::Domain => "Cassandra\\Exception\\DomainException",
            ExceptionKind::Runtime => "Cassandra\\Exception\\RuntimeException",
            ExceptionKind::Timeout => "Cassandra\\Exception\\TimeoutException",
            ExceptionKind::Logic => "Cassandra\\Exception\\LogicException",
            ExceptionKind::Range => "Cassandra\\Exception\\RangeException",
            ExceptionKind::DivideByZero => "Cassandra\\Exception\\DivideByZeroException",
            ExceptionKind::Execution => "Cassandra\\Exception\\ExecutionException",
            ExceptionKind::ReadTimeout => "Cassandra\\Exception\\ReadTimeoutException",
            ExceptionKind::WriteTimeout => "Cassandra\\Exception\\WriteTimeoutException",
            ExceptionKind::Unavailable => "Cassandra\\Exception\\UnavailableException",
            ExceptionKind::Truncate => "Cassandra\\Exception\\TruncateException",
            ExceptionKind::Validation => "Cassandra\\Exception\\ValidationException",
            ExceptionKind::InvalidQuery => "Cassandra\\Exception\\InvalidQueryException",
            ExceptionKind::InvalidSyntax => "Cassandra\\Exception\\InvalidSyntaxException",
            ExceptionKind::Unauthorized => "Cassandra\\Exception\\UnauthorizedException",
            ExceptionKind::Unprepared => "Cassandra\\Exception\\UnpreparedException",
            ExceptionKind::Configuration => "Cassandra\\Exception\\ConfigurationException",
            ExceptionKind::AlreadyExists => "Cassandra\\Exception\\AlreadyExistsException",
            ExceptionKind::Authentication => "Cassandra\\Exception\\AuthenticationException",
            ExceptionKind::Protocol => "Cassandra\\Exception\\ProtocolException",
            ExceptionKind::Server => "Cassandra\\Exception\\ServerException",
            ExceptionKind::IsBootstrapping => "Cassandra\\Exception\\IsBootstrappingException",
            ExceptionKind::Overloaded => "Cassandra\\Exception\\OverloadedException",
        }
    }

    /// Parent exception class inside the binding's hierarchy. Top-level
    /// kinds extend the host's standard exceptions instead.
    pub fn parent(self) -> Option<ExceptionKind> {
        match self {
            ExceptionKind::ReadTimeout
            | ExceptionKind::WriteTimeout
            | ExceptionKind::Unavailable
            | ExceptionKind::Truncate => Some(ExceptionKind::Execution),
            ExceptionKind::InvalidQuery
            | ExceptionKind::InvalidSyntax
            | ExceptionKind::Unauthorized
            | ExceptionKind::Unprepared
            | ExceptionKind::Configuration
            | ExceptionKind::AlreadyExists => Some(ExceptionKind::Validation),
            ExceptionKind::Execution
            | ExceptionKind::Validation
            | ExceptionKind::Authentication
            | ExceptionKind::Protocol
            | ExceptionKind::IsBootstrapping
            | ExceptionKind::Overloaded => Some(ExceptionKind::Server),
            _ => None,
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Error raised across the host boundary. One variant per exception class;
/// the payload is the exception message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Domain(String),
    #[error("{0}")]
    Runtime(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Logic(String),
    #[error("{0}")]
    Range(String),
    #[error("{0}")]
    DivideByZero(String),
    #[error("{0}")]
    Execution(String),
    #[error("{0}")]
    ReadTimeout(String),
    #[error("{0}")]
    WriteTimeout(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Truncate(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidQuery(String),
    #[error("{0}")]
    InvalidSyntax(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Unprepared(String),
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Protocol(String),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    IsBootstrapping(String),
    #[error("{0}")]
    Overloaded(String),
}

impl HostError {
    pub fn new(kind: ExceptionKind, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        match kind {
            ExceptionKind::InvalidArgument => HostError::InvalidArgument(msg),
            ExceptionKind::Domain => HostError::Domain(msg),
            ExceptionKind::Runtime => HostError::Runtime(msg),
            ExceptionKind::Timeout => HostError::Timeout(msg),
            ExceptionKind::Logic => HostError::Logic(msg),
            ExceptionKind::Range => HostError::Range(msg),
            ExceptionKind::DivideByZero => HostError::DivideByZero(msg),
            ExceptionKind::Execution => HostError::Execution(msg),
            ExceptionKind::ReadTimeout => HostError::ReadTimeout(msg),
            ExceptionKind::WriteTimeout => HostError::WriteTimeout(msg),
            ExceptionKind::Unavailable => HostError::Unavailable(msg),
            ExceptionKind::Truncate => HostError::Truncate(msg),
            ExceptionKind::Validation => HostError::Validation(msg),
            ExceptionKind::InvalidQuery => HostError::InvalidQuery(msg),
            ExceptionKind::InvalidSyntax => HostError::InvalidSyntax(msg),
            ExceptionKind::Unauthorized => HostError::Unauthorized(msg),
            ExceptionKind::Unprepared => HostError::Unprepared(msg),
            ExceptionKind::Configuration => HostError::Configuration(msg),
            ExceptionKind::AlreadyExists => HostError::AlreadyExists(msg),
            ExceptionKind::Authentication => HostError::Authentication(msg),
            ExceptionKind::Protocol => HostError::Protocol(msg),
            ExceptionKind::Server => HostError::Server(msg),
            ExceptionKind::IsBootstrapping => HostError::IsBootstrapping(msg),
            ExceptionKind::Overloaded => HostError::Overloaded(msg),
        }
    }

    fn parts(&self) -> (ExceptionKind, &str) {
        match self {
            HostError::InvalidArgument(m) => (ExceptionKind::InvalidArgument, m),
            HostError::Domain(m) => (ExceptionKind::Domain, m),
            HostError::Runtime(m) => (ExceptionKind::Runtime, m),
            HostError::Timeout(m) => (ExceptionKind::Timeout, m),
            HostError::Logic(m) => (ExceptionKind::Logic, m),
            HostError::Range(m) => (ExceptionKind::Range, m),
            HostError::DivideByZero(m) => (ExceptionKind::DivideByZero, m),
            HostError::Execution(m) => (ExceptionKind::Execution, m),
            HostError::ReadTimeout(m) => (ExceptionKind::ReadTimeout, m),
            HostError::WriteTimeout(m) => (ExceptionKind::WriteTimeout, m),
            HostError::Unavailable(m) => (ExceptionKind::Unavailable, m),
            HostError::Truncate(m) => (ExceptionKind::Truncate, m),
            HostError::Validation(m) => (ExceptionKind::Validation, m),
            HostError::InvalidQuery(m) => (ExceptionKind::InvalidQuery, m),
            HostError::InvalidSyntax(m) => (ExceptionKind::InvalidSyntax, m),
            HostError::Unauthorized(m) => (ExceptionKind::Unauthorized, m),
            HostError::Unprepared(m) => (ExceptionKind::Unprepared, m),
            HostError::Configuration(m) => (ExceptionKind::Configuration, m),
            HostError::AlreadyExists(m) => (ExceptionKind::AlreadyExists, m),
            HostError::Authentication(m) => (ExceptionKind::Authentication, m),
            HostError::Protocol(m) => (ExceptionKind::Protocol, m),
            HostError::Server(m) => (ExceptionKind::Server, m),
            HostError::IsBootstrapping(m) => (ExceptionKind::IsBootstrapping, m),
            HostError::Overloaded(m) => (ExceptionKind::Overloaded, m),
        }
    }

    pub fn kind(&self) -> ExceptionKind {
        self.parts().0
    }

    pub fn message(&self) -> &str {
        self.parts().1
    }

    pub fn class_name(&self) -> &'static str {
        self.kind().class_name()
    }

    /// Prepend context to the message, keeping the exception class.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        let (kind, msg) = self.parts();
        HostError::new(kind, format!("{ctx}: {msg}"))
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        HostError::InvalidArgument(msg.into())
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        HostError::Runtime(msg.into())
    }
}

impl From<ValueError> for HostError {
    fn from(e: ValueError) -> Self {
        let kind = match e.kind() {
            ErrorKind::InvalidArgument => ExceptionKind::InvalidArgument,
            ErrorKind::Range => ExceptionKind::Range,
            ErrorKind::DivideByZero => ExceptionKind::DivideByZero,
            ErrorKind::Runtime => ExceptionKind::Runtime,
        };
        HostError::new(kind, e.message())
    }
}

pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_errors_keep_their_class() {
        let e: HostError = ValueError::divide_by_zero("Cannot divide by zero").into();
        assert_eq!(e, HostError::DivideByZero("Cannot divide by zero".into()));
        assert_eq!(e.class_name(), "Cassandra\\Exception\\DivideByZeroException");
    }

    #[test]
    fn kind_round_trips_through_new() {
        for kind in ExceptionKind::ALL {
            let e = HostError::new(kind, "m");
            assert_eq!(e.kind(), kind);
            assert_eq!(e.message(), "m");
        }
    }

    #[test]
    fn context_is_prepended() {
        let e = HostError::runtime("boom").with_context("build");
        assert_eq!(e.to_string(), "build: boom");
        assert_eq!(e.kind(), ExceptionKind::Runtime);
    }

    #[test]
    fn server_hierarchy() {
        assert_eq!(ExceptionKind::ReadTimeout.parent(), Some(ExceptionKind::Execution));
        assert_eq!(ExceptionKind::Execution.parent(), Some(ExceptionKind::Server));
        assert_eq!(ExceptionKind::Server.parent(), None);
        assert_eq!(ExceptionKind::InvalidArgument.parent(), None);
    }
}
