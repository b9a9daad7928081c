use cql_host::HostError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("argument '{arg}': {detail}")]
    Argument { arg: String, detail: String },

    #[error("{}: {}", .0.class_name(), .0.message())]
    Host(#[from] HostError),

    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}
