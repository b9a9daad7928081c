use cql_host::Module;

use crate::config::InfoArgs;
use crate::error::CliError;

pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let ini = match &args.ini {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| CliError::Config {
            context: "read",
            detail: format!("'{path}': {e}"),
        })?),
        None => None,
    };
    let module = Module::startup(ini.as_deref())?;
    super::print(&serde_json::to_value(module.info())?)
}
