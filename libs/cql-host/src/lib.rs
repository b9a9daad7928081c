pub mod cluster;
pub mod config;
pub mod construct;
pub mod driver_error;
pub mod error;
pub mod handlers;
pub mod host_value;
pub mod logging;
pub mod marshal;
pub mod methods;
pub mod module;
pub mod registry;
pub mod resources;
pub mod settings;
pub mod ssl;
pub mod statement;

pub use cluster::{ClusterBuilder, ClusterConfig, RetryPolicy};
pub use config::DriverConfig;
pub use construct::{HostObject, construct, populate};
pub use driver_error::{DriverError, ErrorCode, ErrorSource};
pub use error::{ExceptionKind, HostError, Result};
pub use host_value::{ArrayKey, HostValue};
pub use logging::{LogConfig, LogDestination, LogLevel, LogMessage, LogState};
pub use marshal::{bind_parameter, from_value, to_value};
pub use methods::{Returned, create, invoke};
pub use module::{Module, ModuleInfo};
pub use registry::ClassRegistry;
pub use settings::Settings;
pub use ssl::{SslOptions, SslOptionsBuilder, TlsContext, VerifyFlags};
pub use statement::SimpleStatement;
