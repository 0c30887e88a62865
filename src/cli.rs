use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sticker-search")]
#[command(version, about = "Fuzzy sticker autocomplete over MCP", long_about = None)]
pub struct Cli {
    /// TOML config file; relative paths inside it resolve against its directory
    #[arg(default_value = "config.toml")]
    pub config: PathBuf,
}
