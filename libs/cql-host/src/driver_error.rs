//! Native driver error codes and their mapping onto exception classes.
//!
//! A code packs its source into the top byte: `(source << 24) | code`.

use std::fmt;

use crate::error::{ExceptionKind, HostError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSource {
    None = 0,
    Lib = 1,
    Server = 2,
    Ssl = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(u32);

const fn lib(code: u32) -> ErrorCode {
    ErrorCode(((ErrorSource::Lib as u32) << 24) | code)
}

const fn server(code: u32) -> ErrorCode {
    ErrorCode(((ErrorSource::Server as u32) << 24) | code)
}

const fn ssl(code: u32) -> ErrorCode {
    ErrorCode(((ErrorSource::Ssl as u32) << 24) | code)
}

impl ErrorCode {
    pub const OK: ErrorCode = ErrorCode(0);

    pub const LIB_BAD_PARAMS: ErrorCode = lib(1);
    pub const LIB_NO_STREAMS: ErrorCode = lib(2);
    pub const LIB_UNABLE_TO_INIT: ErrorCode = lib(3);
    pub const LIB_MESSAGE_ENCODE: ErrorCode = lib(4);
    pub const LIB_HOST_RESOLUTION: ErrorCode = lib(5);
    pub const LIB_UNEXPECTED_RESPONSE: ErrorCode = lib(6);
    pub const LIB_REQUEST_QUEUE_FULL: ErrorCode = lib(7);
    pub const LIB_NO_AVAILABLE_IO_THREAD: ErrorCode = lib(8);
    pub const LIB_WRITE_ERROR: ErrorCode = lib(9);
    pub const LIB_NO_HOSTS_AVAILABLE: ErrorCode = lib(10);
    pub const LIB_INDEX_OUT_OF_BOUNDS: ErrorCode = lib(11);
    pub const LIB_INVALID_ITEM_COUNT: ErrorCode = lib(12);
    pub const LIB_INVALID_VALUE_TYPE: ErrorCode = lib(13);
    pub const LIB_REQUEST_TIMED_OUT: ErrorCode = lib(14);
    pub const LIB_UNABLE_TO_SET_KEYSPACE: ErrorCode = lib(15);
    pub const LIB_CALLBACK_ALREADY_SET: ErrorCode = lib(16);
    pub const LIB_INVALID_STATEMENT_TYPE: ErrorCode = lib(17);
    pub const LIB_NAME_DOES_NOT_EXIST: ErrorCode = lib(18);
    pub const LIB_UNABLE_TO_DETERMINE_PROTOCOL: ErrorCode = lib(19);
    pub const LIB_NULL_VALUE: ErrorCode = lib(20);
    pub const LIB_NOT_IMPLEMENTED: ErrorCode = lib(21);
    pub const LIB_UNABLE_TO_CONNECT: ErrorCode = lib(22);
    pub const LIB_UNABLE_TO_CLOSE: ErrorCode = lib(23);
    pub const LIB_NO_PAGING_STATE: ErrorCode = lib(24);
    pub const LIB_PARAMETER_UNSET: ErrorCode = lib(25);
    pub const LIB_INVALID_ERROR_RESULT_TYPE: ErrorCode = lib(26);
    pub const LIB_INVALID_FUTURE_TYPE: ErrorCode = lib(27);
    pub const LIB_INTERNAL_ERROR: ErrorCode = lib(28);
    pub const LIB_INVALID_CUSTOM_TYPE: ErrorCode = lib(29);
    pub const LIB_INVALID_DATA: ErrorCode = lib(30);
    pub const LIB_NOT_ENOUGH_DATA: ErrorCode = lib(31);
    pub const LIB_INVALID_STATE: ErrorCode = lib(32);
    pub const LIB_NO_CUSTOM_PAYLOAD: ErrorCode = lib(33);
    pub const LIB_EXECUTION_PROFILE_INVALID: ErrorCode = lib(34);
    pub const LIB_NO_TRACING_ID: ErrorCode = lib(35);

    pub const SERVER_SERVER_ERROR: ErrorCode = server(0x0000);
    pub const SERVER_PROTOCOL_ERROR: ErrorCode = server(0x000A);
    pub const SERVER_BAD_CREDENTIALS: ErrorCode = server(0x0100);
    pub const SERVER_UNAVAILABLE: ErrorCode = server(0x1000);
    pub const SERVER_OVERLOADED: ErrorCode = server(0x1001);
    pub const SERVER_IS_BOOTSTRAPPING: ErrorCode = server(0x1002);
    pub const SERVER_TRUNCATE_ERROR: ErrorCode = server(0x1003);
    pub const SERVER_WRITE_TIMEOUT: ErrorCode = server(0x1100);
    pub const SERVER_READ_TIMEOUT: ErrorCode = server(0x1200);
    pub const SERVER_READ_FAILURE: ErrorCode = server(0x1300);
    pub const SERVER_FUNCTION_FAILURE: ErrorCode = server(0x1400);
    pub const SERVER_WRITE_FAILURE: ErrorCode = server(0x1500);
    pub const SERVER_SYNTAX_ERROR: ErrorCode = server(0x2000);
    pub const SERVER_UNAUTHORIZED: ErrorCode = server(0x2100);
    pub const SERVER_INVALID_QUERY: ErrorCode = server(0x2200);
    pub const SERVER_CONFIG_ERROR: ErrorCode = server(0x2300);
    pub const SERVER_ALREADY_EXISTS: ErrorCode = server(0x2400);
    pub const SERVER_UNPREPARED: ErrorCode = server(0x2500);

    pub const SSL_NO_PEER_CERT: ErrorCode = ssl(1);
    pub const SSL_INVALID_PEER_CERT: ErrorCode = ssl(2);
    pub const SSL_IDENTITY_MISMATCH: ErrorCode = ssl(3);
    pub const SSL_PROTOCOL_ERROR: ErrorCode = ssl(4);
    pub const SSL_INVALID_CERT: ErrorCode = ssl(5);
    pub const SSL_INVALID_PRIVATE_KEY: ErrorCode = ssl(6);

    pub const fn from_raw(raw: u32) -> Self {
        ErrorCode(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn source(self) -> ErrorSource {
        match self.0 >> 24 {
            1 => ErrorSource::Lib,
            2 => ErrorSource::Server,
            3 => ErrorSource::Ssl,
            _ => ErrorSource::None,
        }
    }

    /// Code within its source.
    pub fn code(self) -> u32 {
        self.0 & 0x00ff_ffff
    }

    /// Exception class raised for this code. Codes outside the table raise
    /// `RuntimeException`.
    pub fn exception_kind(self) -> ExceptionKind {
        match self {
            Self::LIB_BAD_PARAMS
            | Self::LIB_INDEX_OUT_OF_BOUNDS
            | Self::LIB_INVALID_ITEM_COUNT
            | Self::LIB_INVALID_VALUE_TYPE
            | Self::LIB_INVALID_STATEMENT_TYPE
            | Self::LIB_NAME_DOES_NOT_EXIST
            | Self::LIB_NULL_VALUE
            | Self::SSL_INVALID_CERT
            | Self::SSL_INVALID_PRIVATE_KEY
            | Self::SSL_NO_PEER_CERT
            | Self::SSL_INVALID_PEER_CERT
            | Self::SSL_IDENTITY_MISMATCH => ExceptionKind::InvalidArgument,

            Self::LIB_NO_STREAMS
            | Self::LIB_UNABLE_TO_INIT
            | Self::LIB_MESSAGE_ENCODE
            | Self::LIB_HOST_RESOLUTION
            | Self::LIB_UNEXPECTED_RESPONSE
            | Self::LIB_REQUEST_QUEUE_FULL
            | Self::LIB_NO_AVAILABLE_IO_THREAD
            | Self::LIB_WRITE_ERROR
            | Self::LIB_NO_HOSTS_AVAILABLE
            | Self::LIB_UNABLE_TO_SET_KEYSPACE
            | Self::LIB_UNABLE_TO_DETERMINE_PROTOCOL
            | Self::LIB_UNABLE_TO_CONNECT
            | Self::LIB_UNABLE_TO_CLOSE => ExceptionKind::Runtime,

            Self::LIB_REQUEST_TIMED_OUT => ExceptionKind::Timeout,

            Self::LIB_CALLBACK_ALREADY_SET | Self::LIB_NOT_IMPLEMENTED => ExceptionKind::Logic,

            Self::SERVER_SERVER_ERROR => ExceptionKind::Server,
            Self::SERVER_PROTOCOL_ERROR => ExceptionKind::Protocol,
            Self::SERVER_BAD_CREDENTIALS => ExceptionKind::Authentication,
            Self::SERVER_UNAVAILABLE => ExceptionKind::Unavailable,
            Self::SERVER_OVERLOADED => ExceptionKind::Overloaded,
            Self::SERVER_IS_BOOTSTRAPPING => ExceptionKind::IsBootstrapping,
            Self::SERVER_TRUNCATE_ERROR => ExceptionKind::Truncate,
            Self::SERVER_WRITE_TIMEOUT => ExceptionKind::WriteTimeout,
            Self::SERVER_READ_TIMEOUT => ExceptionKind::ReadTimeout,
            Self::SERVER_SYNTAX_ERROR => ExceptionKind::InvalidSyntax,
            Self::SERVER_UNAUTHORIZED => ExceptionKind::Unauthorized,
            Self::SERVER_INVALID_QUERY => ExceptionKind::InvalidQuery,
            Self::SERVER_CONFIG_ERROR => ExceptionKind::Configuration,
            Self::SERVER_ALREADY_EXISTS => ExceptionKind::AlreadyExists,
            Self::SERVER_UNPREPARED => ExceptionKind::Unprepared,

            _ => ExceptionKind::Runtime,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Error reported by the native driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DriverError {
    pub code: ErrorCode,
    pub message: String,
}

impl DriverError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<DriverError> for HostError {
    fn from(e: DriverError) -> Self {
        HostError::new(e.code.exception_kind(), e.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_pack_source_in_top_byte() {
        assert_eq!(ErrorCode::LIB_BAD_PARAMS.raw(), 0x0100_0001);
        assert_eq!(ErrorCode::SERVER_UNPREPARED.raw(), 0x0200_2500);
        assert_eq!(ErrorCode::SSL_INVALID_PRIVATE_KEY.raw(), 0x0300_0006);
        assert_eq!(ErrorCode::SERVER_READ_TIMEOUT.source(), ErrorSource::Server);
        assert_eq!(ErrorCode::SERVER_READ_TIMEOUT.code(), 0x1200);
    }

    #[test]
    fn mapping_table() {
        let cases = [
            (ErrorCode::LIB_NULL_VALUE, ExceptionKind::InvalidArgument),
            (ErrorCode::SSL_IDENTITY_MISMATCH, ExceptionKind::InvalidArgument),
            (ErrorCode::LIB_NO_HOSTS_AVAILABLE, ExceptionKind::Runtime),
            (ErrorCode::LIB_REQUEST_TIMED_OUT, ExceptionKind::Timeout),
            (ErrorCode::LIB_NOT_IMPLEMENTED, ExceptionKind::Logic),
            (ErrorCode::SERVER_BAD_CREDENTIALS, ExceptionKind::Authentication),
            (ErrorCode::SERVER_TRUNCATE_ERROR, ExceptionKind::Truncate),
            (ErrorCode::SERVER_SYNTAX_ERROR, ExceptionKind::InvalidSyntax),
            (ErrorCode::SERVER_CONFIG_ERROR, ExceptionKind::Configuration),
            (ErrorCode::SERVER_UNPREPARED, ExceptionKind::Unprepared),
        ];
        for (code, kind) in cases {
            assert_eq!(code.exception_kind(), kind, "{code}");
        }
    }

    #[test]
    fn unmapped_codes_are_runtime() {
        for code in [
            ErrorCode::LIB_NO_PAGING_STATE,
            ErrorCode::LIB_NO_TRACING_ID,
            ErrorCode::SERVER_READ_FAILURE,
            ErrorCode::SERVER_WRITE_FAILURE,
            ErrorCode::SSL_PROTOCOL_ERROR,
            ErrorCode::from_raw(0x0400_0001),
        ] {
            assert_eq!(code.exception_kind(), ExceptionKind::Runtime, "{code}");
        }
    }

    #[test]
    fn driver_error_becomes_host_error() {
        let e: HostError = DriverError::new(ErrorCode::SERVER_OVERLOADED, "busy").into();
        assert_eq!(e, HostError::Overloaded("busy".into()));
    }
}
