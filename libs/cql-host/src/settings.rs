//! Runtime settings exposed through the host's INI mechanism.

use crate::error::{HostError, Result};
use crate::logging::{LogConfig, LogLevel};

pub const LOG: &str = "cassandra.log";
pub const LOG_LEVEL: &str = "cassandra.log_level";

/// Declaration of a single setting. Every setting is a string that may be
/// changed at any time; changes are applied immediately.
#[derive(Debug, Clone)]
pub struct ConfigParam {
    pub name: &'static str,
    pub default: Option<&'static str>,
    pub description: &'static str,
}

/// Settings declared by the driver module.
pub fn driver_params() -> Vec<ConfigParam> {
    vec![
        ConfigParam {
            name: LOG,
            default: None,
            description: "Driver log file path, or 'syslog'",
        },
        ConfigParam {
            name: LOG_LEVEL,
            default: Some(LogLevel::Error.as_str()),
            description: "One of CRITICAL, ERROR, WARN, INFO, DEBUG, TRACE",
        },
    ]
}

/// Current setting values, validated against their declarations and
/// applied to a log configuration as they change.
pub struct Settings<'a> {
    params: Vec<ConfigParam>,
    entries: Vec<(&'static str, String)>,
    log: &'a LogConfig,
    started: bool,
}

impl Settings<'static> {
    /// Settings bound to the process-wide log configuration.
    pub fn global() -> Self {
        Settings::new(LogConfig::global())
    }
}

impl<'a> Settings<'a> {
    pub fn new(log: &'a LogConfig) -> Self {
        let params = driver_params();
        let entries = params
            .iter()
            .filter_map(|p| p.default.map(|v| (p.name, v.to_string())))
            .collect();
        Self { params, entries, log, started: false }
    }

    /// Apply every current value; later changes apply as they are made.
    pub fn startup(&mut self) {
        for (name, value) in &self.entries {
            self.apply(name, Some(value.as_str()));
        }
        self.started = true;
    }

    pub fn params(&self) -> &[ConfigParam] {
        &self.params
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let name = self
            .params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.name)
            .ok_or_else(|| HostError::invalid_argument(format!("Unknown setting '{name}'")))?;
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((name, value.to_string()));
        }
        if self.started {
            self.apply(name, Some(value));
        }
        Ok(())
    }

    pub fn reset(&mut self, name: &str) {
        self.entries.retain(|(k, _)| *k != name);
        if self.started {
            self.apply(name, None);
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Load `key = value` lines. Section headers and `;` comments are
    /// ignored; values may be quoted.
    pub fn load_ini(&mut self, text: &str) -> Result<()> {
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                HostError::Configuration(format!("line {}: expected key = value", n + 1))
            })?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            let key = key.trim();
            if self.params.iter().any(|p| p.name == key) {
                self.set(key, value)?;
            }
        }
        Ok(())
    }

    fn apply(&self, name: &str, text: Option<&str>) {
        match name {
            LOG => self.log.set_location(text),
            LOG_LEVEL => {
                self.log.set_level_name(text.unwrap_or(LogLevel::Error.as_str()));
            }
            _ => {}
        }
        tracing::debug!(setting = name, value = ?text, "applied setting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogDestination;

    #[test]
    fn defaults_apply_at_startup() {
        let log = LogConfig::new();
        log.set_level(LogLevel::Trace);
        let mut settings = Settings::new(&log);
        assert_eq!(settings.get_str(LOG_LEVEL), Some("ERROR"));
        assert_eq!(settings.get_str(LOG), None);
        settings.startup();
        assert_eq!(log.level(), LogLevel::Error);
    }

    #[test]
    fn runtime_changes_take_effect() {
        let log = LogConfig::new();
        let mut settings = Settings::new(&log);
        settings.startup();
        settings.set(LOG_LEVEL, "DEBUG").unwrap();
        assert_eq!(log.level(), LogLevel::Debug);
        settings.set(LOG, "syslog").unwrap();
        assert_eq!(log.destination(), Some(LogDestination::Syslog));
        settings.reset(LOG);
        assert_eq!(log.destination(), None);
    }

    #[test]
    fn values_before_startup_are_deferred() {
        let log = LogConfig::new();
        let mut settings = Settings::new(&log);
        settings.set(LOG_LEVEL, "TRACE").unwrap();
        assert_eq!(log.level(), LogLevel::Error);
        settings.startup();
        assert_eq!(log.level(), LogLevel::Trace);
        assert_eq!(settings.params().len(), 2);
    }

    #[test]
    fn unknown_setting_is_rejected() {
        let log = LogConfig::new();
        let mut settings = Settings::new(&log);
        assert!(settings.set("cassandra.nope", "1").is_err());
    }

    #[test]
    fn ini_lines_are_loaded() {
        let log = LogConfig::new();
        let mut settings = Settings::new(&log);
        let ini = "[cassandra]\n; driver\ncassandra.log_level = \"WARN\"\nmemory_limit = 128M\n";
        settings.load_ini(ini).unwrap();
        settings.startup();
        assert_eq!(log.level(), LogLevel::Warn);
        assert!(settings.load_ini("garbage").is_err());
    }
}
