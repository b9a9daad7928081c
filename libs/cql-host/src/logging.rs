//! Driver log sink.
//!
//! The destination (a file path or `syslog`) and the severity threshold are
//! process-wide state behind a single `RwLock`. Emission snapshots both under
//! the read lock and writes without holding it.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

/// Token selecting the system log instead of a file.
pub const SYSLOG: &str = "syslog";

const PREFIX: &str = "cassandra";

/// Driver log severities, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Disabled = 0,
    Critical = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Disabled => "DISABLED",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Threshold selected by a `cassandra.log_level` setting. `CRITICAL`
    /// turns driver logging off. Unknown names yield `None`.
    pub fn from_setting(name: &str) -> Option<Self> {
        match name {
            "CRITICAL" => Some(LogLevel::Disabled),
            "ERROR" => Some(LogLevel::Error),
            "WARN" => Some(LogLevel::Warn),
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            "TRACE" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where driver log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Syslog,
    File(PathBuf),
}

/// One message reported by the driver.
#[derive(Debug, Clone)]
pub struct LogMessage<'a> {
    pub severity: LogLevel,
    pub message: &'a str,
    pub file: &'a str,
    pub line: u32,
}

/// Sink a message was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Dropped,
    Syslog,
    File,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogState {
    pub destination: Option<LogDestination>,
    pub level: LogLevel,
}

impl LogState {
    fn enabled(&self, severity: LogLevel) -> bool {
        severity != LogLevel::Disabled && severity <= self.level
    }
}

pub struct LogConfig {
    state: RwLock<LogState>,
}

static GLOBAL: LogConfig = LogConfig::new();

impl LogConfig {
    pub const fn new() -> Self {
        Self {
            state: RwLock::new(LogState { destination: None, level: LogLevel::Error }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Destination and level as seen by a single reader.
    pub fn snapshot(&self) -> LogState {
        self.read().clone()
    }

    /// The process-wide configuration.
    pub fn global() -> &'static LogConfig {
        &GLOBAL
    }

    /// Replace the destination. File paths are canonicalized when they
    /// resolve and kept verbatim otherwise.
    pub fn set_location(&self, location: Option<&str>) {
        let destination = location.map(|loc| {
            if loc == SYSLOG {
                LogDestination::Syslog
            } else {
                let path = Path::new(loc);
                LogDestination::File(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
            }
        });
        self.write().destination = destination;
    }

    pub fn destination(&self) -> Option<LogDestination> {
        self.read().destination.clone()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.write().level = level;
    }

    /// Apply a level name. Unknown names fall back to `ERROR` with a notice.
    pub fn set_level_name(&self, name: &str) -> LogLevel {
        let level = LogLevel::from_setting(name).unwrap_or_else(|| {
            tracing::warn!("{PREFIX} | Unknown log level '{name}', using 'ERROR'");
            LogLevel::Error
        });
        self.set_level(level);
        level
    }

    pub fn level(&self) -> LogLevel {
        self.read().level
    }

    pub fn enabled(&self, severity: LogLevel) -> bool {
        self.read().enabled(severity)
    }

    /// Emit one message. File destinations are opened in append mode for
    /// this write only; a file that cannot be opened falls back to stderr.
    pub fn log(&self, message: &LogMessage<'_>) -> Sink {
        let destination = {
            let state = self.read();
            if !state.enabled(message.severity) {
                return Sink::Dropped;
            }
            state.destination.clone()
        };
        match destination {
            Some(LogDestination::Syslog) => {
                tracing::info!(target: "syslog", "{}", prefixed_line(message));
                Sink::Syslog
            }
            Some(LogDestination::File(path)) => match append_line(&path, message) {
                Ok(()) => Sink::File,
                Err(_) => write_stderr(message),
            },
            None => write_stderr(message),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn body(message: &LogMessage<'_>) -> String {
    format!(
        "[{}] {} ({}:{})",
        message.severity, message.message, message.file, message.line
    )
}

fn prefixed_line(message: &LogMessage<'_>) -> String {
    format!("{PREFIX} | {}", body(message))
}

pub(crate) fn file_line(message: &LogMessage<'_>) -> String {
    let stamp = Utc::now().format("%d-%m-%Y %H:%M:%S %Z");
    format!("{stamp} {}\n", body(message))
}

fn append_line(path: &Path, message: &LogMessage<'_>) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(file_line(message).as_bytes())
}

fn write_stderr(message: &LogMessage<'_>) -> Sink {
    eprintln!("{}", prefixed_line(message));
    Sink::Stderr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(severity: LogLevel) -> LogMessage<'static> {
        LogMessage { severity, message: "connected", file: "cluster.cpp", line: 42 }
    }

    #[test]
    fn critical_disables_logging() {
        let config = LogConfig::new();
        assert_eq!(config.level(), LogLevel::Error);
        config.set_level_name("CRITICAL");
        assert_eq!(config.level(), LogLevel::Disabled);
        assert_eq!(config.log(&msg(LogLevel::Critical)), Sink::Dropped);
    }

    #[test]
    fn unknown_level_falls_back_to_error() {
        let config = LogConfig::new();
        config.set_level(LogLevel::Trace);
        assert_eq!(config.set_level_name("LOUD"), LogLevel::Error);
        assert_eq!(config.level(), LogLevel::Error);
    }

    #[test]
    fn threshold_filters_less_severe() {
        let config = LogConfig::new();
        config.set_level(LogLevel::Warn);
        assert!(config.enabled(LogLevel::Error));
        assert!(config.enabled(LogLevel::Warn));
        assert!(!config.enabled(LogLevel::Info));
        assert_eq!(config.log(&msg(LogLevel::Debug)), Sink::Dropped);
    }

    #[test]
    fn syslog_token_selects_syslog() {
        let config = LogConfig::new();
        config.set_location(Some(SYSLOG));
        assert_eq!(config.destination(), Some(LogDestination::Syslog));
        assert_eq!(config.log(&msg(LogLevel::Error)), Sink::Syslog);
        config.set_location(None);
        assert_eq!(config.destination(), None);
        assert_eq!(config.log(&msg(LogLevel::Error)), Sink::Stderr);
    }

    #[test]
    fn file_lines_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("driver.log");
        let config = LogConfig::new();
        config.set_location(path.to_str());
        assert_eq!(config.log(&msg(LogLevel::Error)), Sink::File);
        assert_eq!(config.log(&msg(LogLevel::Error)), Sink::File);
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" UTC [ERROR] connected (cluster.cpp:42)"));
    }

    #[test]
    fn readers_see_level_and_destination_together() {
        let config = LogConfig::new();
        config.set_location(Some(SYSLOG));
        config.set_level(LogLevel::Debug);
        assert_eq!(
            config.snapshot(),
            LogState { destination: Some(LogDestination::Syslog), level: LogLevel::Debug }
        );

        config.set_location(None);
        assert_eq!(config.snapshot().level, LogLevel::Debug);
        assert_eq!(config.log(&msg(LogLevel::Debug)), Sink::Stderr);
        assert_eq!(config.log(&msg(LogLevel::Trace)), Sink::Dropped);
    }

    #[test]
    fn unopenable_file_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("driver.log");
        let config = LogConfig::new();
        config.set_location(path.to_str());
        assert_eq!(config.log(&msg(LogLevel::Error)), Sink::Stderr);
    }
}
