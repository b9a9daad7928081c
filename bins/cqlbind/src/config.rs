use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cqlbind", about = "Typed CQL value marshalling from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Construct an object, fill it and call methods on it
    Construct(ConstructArgs),
    /// Build TLS options from a config file
    Ssl(SslArgs),
    /// Print module information
    Info(InfoArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ConstructArgs {
    /// Class name, e.g. 'Cassandra\Set'
    pub class: String,
    /// Constructor arguments as JSON values
    pub args: Vec<String>,
    /// Collection items as JSON values, applied in order
    #[arg(long = "item")]
    pub items: Vec<String>,
    /// Method call as `name` or `name=<JSON array of arguments>`
    #[arg(long = "call")]
    pub calls: Vec<String>,
}

#[derive(Args, Clone, Debug)]
pub struct SslArgs {
    /// Path to the TOML config file
    #[arg(long, default_value = "cqlbind.toml", env = "CQLBIND_CONFIG")]
    pub config: String,
}

#[derive(Args, Clone, Debug)]
pub struct InfoArgs {
    /// Path to an INI file with cassandra.* settings
    #[arg(long, env = "CQLBIND_INI")]
    pub ini: Option<String>,
}
