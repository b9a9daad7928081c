use serde::Deserialize;

use cql_types::TimestampGenerator;

use crate::cluster::{ClusterBuilder, RetryPolicy};
use crate::error::{HostError, Result};
use crate::settings::{self, Settings};
use crate::ssl::{SslOptions, SslOptionsBuilder, VerifyFlags};

/// Root configuration, parsed from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub log: LogSection,
    /// TLS material; no TLS when absent.
    #[serde(default)]
    pub ssl: Option<SslSection>,
    #[serde(default)]
    pub cluster: ClusterSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    /// File path or `syslog`.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self { location: None, level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "ERROR".into()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SslSection {
    #[serde(default)]
    pub trusted_certs: Vec<String>,
    #[serde(default)]
    pub verify_flags: u32,
    #[serde(default)]
    pub client_cert: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub passphrase: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterSection {
    #[serde(default = "default_contact_points")]
    pub contact_points: String,
    #[serde(default = "default_port")]
    pub port: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_timestamp_generator")]
    pub timestamp_generator: String,
    #[serde(default = "default_retry_policy")]
    pub retry_policy: String,
}

impl Default for ClusterSection {
    fn default() -> Self {
        Self {
            contact_points: default_contact_points(),
            port: default_port(),
            username: None,
            password: None,
            timestamp_generator: default_timestamp_generator(),
            retry_policy: default_retry_policy(),
        }
    }
}

fn default_contact_points() -> String {
    crate::cluster::DEFAULT_CONTACT_POINT.into()
}
fn default_port() -> i64 {
    i64::from(crate::cluster::DEFAULT_PORT)
}
fn default_timestamp_generator() -> String {
    "monotonic".into()
}
fn default_retry_policy() -> String {
    "default".into()
}

impl DriverConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HostError::Configuration(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| HostError::Configuration(e.to_string()))
    }

    /// Push the `[log]` section into runtime settings.
    pub fn apply_log(&self, settings: &mut Settings<'_>) -> Result<()> {
        match &self.log.location {
            Some(location) => settings.set(settings::LOG, location)?,
            None => settings.reset(settings::LOG),
        }
        settings.set(settings::LOG_LEVEL, &self.log.level)
    }

    /// Builder for the `[ssl]` section; paths are checked for readability.
    pub fn ssl_builder(&self) -> Result<Option<SslOptionsBuilder>> {
        let Some(ssl) = &self.ssl else {
            return Ok(None);
        };
        let mut builder = SslOptionsBuilder::new();
        builder
            .with_trusted_certs(&ssl.trusted_certs)?
            .with_verify_flags(VerifyFlags::from_bits(ssl.verify_flags));
        if let Some(cert) = &ssl.client_cert {
            builder.with_client_cert(cert)?;
        }
        if let Some(key) = &ssl.private_key {
            builder.with_private_key(key, ssl.passphrase.as_deref())?;
        }
        Ok(Some(builder))
    }

    pub fn ssl_options(&self) -> Result<Option<SslOptions>> {
        self.ssl_builder()?.map(|b| b.build()).transpose()
    }

    pub fn cluster_builder(&self) -> Result<ClusterBuilder> {
        let section = &self.cluster;
        let mut builder = ClusterBuilder::new();
        builder
            .with_contact_points(&section.contact_points)?
            .with_port(section.port)?
            .with_retry_policy(section.retry_policy.parse::<RetryPolicy>()?);
        match section.timestamp_generator.as_str() {
            "monotonic" => builder.with_timestamp_generator(TimestampGenerator::monotonic()),
            "server_side" => builder.with_timestamp_generator(TimestampGenerator::server_side()),
            other => {
                return Err(HostError::Configuration(format!(
                    "Unknown timestamp generator '{other}'"
                )));
            }
        };
        match (&section.username, &section.password) {
            (Some(user), Some(pass)) => {
                builder.with_credentials(user, pass);
            }
            (None, None) => {}
            _ => {
                return Err(HostError::Configuration(
                    "username and password must be set together".into(),
                ));
            }
        }
        if let Some(ssl) = self.ssl_options()? {
            builder.with_ssl(ssl);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExceptionKind;
    use crate::logging::{LogConfig, LogDestination, LogLevel};

    #[test]
    fn empty_config_uses_defaults() {
        let config = DriverConfig::parse("").unwrap();
        assert_eq!(config.log.level, "ERROR");
        assert!(config.ssl.is_none());
        let cluster = config.cluster_builder().unwrap().build();
        assert_eq!(cluster.port, 9042);
        assert_eq!(cluster.contact_points, vec!["127.0.0.1"]);
    }

    #[test]
    fn sections_are_parsed() {
        let config = DriverConfig::parse(
            r#"
            [log]
            location = "syslog"
            level = "DEBUG"

            [cluster]
            contact_points = "10.0.0.1,10.0.0.2"
            port = 9142
            username = "cassandra"
            password = "cassandra"
            timestamp_generator = "server_side"
            retry_policy = "logging:fallthrough"
            "#,
        )
        .unwrap();
        let log = LogConfig::new();
        let mut settings = Settings::new(&log);
        settings.startup();
        config.apply_log(&mut settings).unwrap();
        assert_eq!(log.destination(), Some(LogDestination::Syslog));
        assert_eq!(log.level(), LogLevel::Debug);

        let cluster = config.cluster_builder().unwrap().build();
        assert_eq!(cluster.port, 9142);
        assert_eq!(cluster.timestamp_generator.name(), "server_side");
        assert_eq!(cluster.retry_policy.to_string(), "logging:fallthrough");
    }

    #[test]
    fn invalid_toml_is_configuration_error() {
        let err = DriverConfig::parse("[log").unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Configuration);
        let err = DriverConfig::load("/nonexistent/cqlbind.toml").unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Configuration);
    }

    #[test]
    fn half_credentials_are_rejected() {
        let config = DriverConfig::parse("[cluster]\nusername = \"u\"\n").unwrap();
        assert!(config.cluster_builder().is_err());
    }
}
