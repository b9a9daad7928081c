pub mod construct;
pub mod info;
pub mod ssl;

use crate::error::CliError;

pub(crate) fn print(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
