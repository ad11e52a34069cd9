use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "custom-kw-server", about = "Custom keyword schemas, result files and reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a keyword's result file and print the record as JSON
    Parse(ParseArgs),
    /// Print a keyword's schema
    Keys(KeysArgs),
    /// Run the message server
    Serve(ServeArgs),
    /// Send one description to a message server
    Report(ReportArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Path to the keyword config file (.toml or .hcl)
    #[arg(long, default_value = "keywords.toml", env = "CUSTOM_KW_CONFIG")]
    pub config: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Keyword name
    #[arg(long)]
    pub keyword: String,
    /// Realization index substituted into the result file pattern
    #[arg(long, default_value_t = 0)]
    pub iens: usize,
    /// Also write the record to the keyword's output file for --iens
    #[arg(long)]
    pub write_output: bool,
    /// Result file; defaults to the keyword's pattern rendered with --iens
    pub file: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct KeysArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Keyword name
    #[arg(long)]
    pub keyword: String,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:5555", env = "CUSTOM_KW_LISTEN")]
    pub addr: String,
}

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Server address
    #[arg(long, default_value = "127.0.0.1:5555")]
    pub addr: String,
    /// Reporter name
    #[arg(long, default_value = "reporter")]
    pub name: String,
    /// Description to send
    pub description: String,
}
