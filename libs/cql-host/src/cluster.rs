use std::fmt;
use std::sync::Arc;

use cql_types::TimestampGenerator;

use crate::error::{HostError, Result};
use crate::ssl::SslOptions;

pub const DEFAULT_CONTACT_POINT: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9042;

/// Retry policy handed to the native driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryPolicy {
    Default,
    DowngradingConsistency,
    Fallthrough,
    /// Logs every decision of the wrapped policy.
    Logging(Box<RetryPolicy>),
}

impl RetryPolicy {
    /// Wrap `inner` in a logging policy. Logging policies do not nest.
    pub fn logging(inner: RetryPolicy) -> Result<Self> {
        if matches!(inner, RetryPolicy::Logging(_)) {
            return Err(HostError::invalid_argument(
                "Cannot add a Cassandra\\RetryPolicy\\Logging as child policy of Cassandra\\RetryPolicy\\Logging",
            ));
        }
        Ok(RetryPolicy::Logging(Box::new(inner)))
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            RetryPolicy::Default => "Cassandra\\RetryPolicy\\DefaultPolicy",
            RetryPolicy::DowngradingConsistency => "Cassandra\\RetryPolicy\\DowngradingConsistency",
            RetryPolicy::Fallthrough => "Cassandra\\RetryPolicy\\Fallthrough",
            RetryPolicy::Logging(_) => "Cassandra\\RetryPolicy\\Logging",
        }
    }
}

impl std::str::FromStr for RetryPolicy {
    type Err = HostError;

    /// Parse `default`, `downgrading`, `fallthrough` or `logging:<inner>`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(RetryPolicy::Default),
            "downgrading" | "downgrading_consistency" => Ok(RetryPolicy::DowngradingConsistency),
            "fallthrough" => Ok(RetryPolicy::Fallthrough),
            _ => match s.strip_prefix("logging:") {
                Some(inner) => RetryPolicy::logging(inner.parse()?),
                None => Err(HostError::invalid_argument(format!("Unknown retry policy '{s}'"))),
            },
        }
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryPolicy::Default => f.write_str("default"),
            RetryPolicy::DowngradingConsistency => f.write_str("downgrading"),
            RetryPolicy::Fallthrough => f.write_str("fallthrough"),
            RetryPolicy::Logging(inner) => write!(f, "logging:{inner}"),
        }
    }
}

/// Immutable cluster configuration.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub contact_points: Vec<String>,
    pub port: u16,
    pub credentials: Option<(String, String)>,
    pub ssl: Option<SslOptions>,
    pub timestamp_generator: Arc<TimestampGenerator>,
    pub retry_policy: RetryPolicy,
    pub persistent: bool,
}

impl ClusterConfig {
    /// Key under which a persistent cluster handle is shared.
    pub fn persistent_key(&self) -> String {
        let user = self.credentials.as_ref().map_or("", |(u, _)| u.as_str());
        format!(
            "cassandra:{}:{}:{user}:{}:{}",
            self.contact_points.join(","),
            self.port,
            self.retry_policy,
            self.timestamp_generator.name()
        )
    }
}

#[derive(Debug, Default)]
pub struct ClusterBuilder {
    contact_points: Vec<String>,
    port: Option<u16>,
    credentials: Option<(String, String)>,
    ssl: Option<SslOptions>,
    timestamp_generator: Option<Arc<TimestampGenerator>>,
    retry_policy: Option<RetryPolicy>,
    persistent: Option<bool>,
}

impl ClusterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-separated host list; appends to the hosts set so far.
    pub fn with_contact_points(&mut self, hosts: &str) -> Result<&mut Self> {
        let hosts: Vec<String> = hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        if hosts.is_empty() {
            return Err(HostError::invalid_argument("Contact points must not be empty"));
        }
        self.contact_points.extend(hosts);
        Ok(self)
    }

    pub fn with_port(&mut self, port: i64) -> Result<&mut Self> {
        let port = u16::try_from(port).ok().filter(|p| *p > 0).ok_or_else(|| {
            HostError::invalid_argument(format!(
                "port must be an integer between 1 and 65535, {port} given"
            ))
        })?;
        self.port = Some(port);
        Ok(self)
    }

    pub fn with_credentials(&mut self, username: &str, password: &str) -> &mut Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn with_ssl(&mut self, ssl: SslOptions) -> &mut Self {
        self.ssl = Some(ssl);
        self
    }

    pub fn with_timestamp_generator(&mut self, generator: TimestampGenerator) -> &mut Self {
        self.timestamp_generator = Some(Arc::new(generator));
        self
    }

    pub fn with_retry_policy(&mut self, policy: RetryPolicy) -> &mut Self {
        self.retry_policy = Some(policy);
        self
    }

    pub fn with_persistent_sessions(&mut self, enabled: bool) -> &mut Self {
        self.persistent = Some(enabled);
        self
    }

    pub fn build(&self) -> ClusterConfig {
        let contact_points = if self.contact_points.is_empty() {
            vec![DEFAULT_CONTACT_POINT.to_string()]
        } else {
            self.contact_points.clone()
        };
        ClusterConfig {
            contact_points,
            port: self.port.unwrap_or(DEFAULT_PORT),
            credentials: self.credentials.clone(),
            ssl: self.ssl.clone(),
            timestamp_generator: self
                .timestamp_generator
                .clone()
                .unwrap_or_else(|| Arc::new(TimestampGenerator::monotonic())),
            retry_policy: self.retry_policy.clone().unwrap_or(RetryPolicy::Default),
            persistent: self.persistent.unwrap_or(true),
        }
    }
}
