use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "snippet-review")]
#[clap(about = "AI-powered code review for a single snippet", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ~/snippet-review/config.toml)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
