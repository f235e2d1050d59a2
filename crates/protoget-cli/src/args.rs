use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the protoget binary.
#[derive(Parser, Debug)]
#[command(
    name = "protoget",
    version,
    about = "Report direct reads of protobuf message fields and suggest the generated getters"
)]
pub struct CliArgs {
    /// Files or directories to check. Defaults to the configuration's
    /// include patterns under the current directory.
    pub paths: Vec<PathBuf>,

    /// Path to protoget.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable color and formatting in text output.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Name of the nullary method that marks message types.
    #[arg(long)]
    pub marker: Option<String>,

    /// Print the files that would be checked and stop.
    #[arg(long = "list-files", alias = "listFiles")]
    pub list_files: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
