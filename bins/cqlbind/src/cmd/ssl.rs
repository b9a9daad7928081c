use cql_host::{DriverConfig, HostObject};

use crate::config::SslArgs;
use crate::error::CliError;

pub fn run(args: SslArgs) -> Result<(), CliError> {
    let config = DriverConfig::load(&args.config)?;
    let Some(options) = config.ssl_options()? else {
        return Err(CliError::Config {
            context: "ssl",
            detail: format!("'{}' has no [ssl] section", args.config),
        });
    };
    tracing::info!(config = %args.config, trusted_certs = options.trusted_cert_count(), "ssl options built");
    super::print(&HostObject::SslOptions(options).to_json())
}
