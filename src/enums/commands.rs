use std::path::PathBuf;
use clap::Subcommand;
use crate::enums::language::Language;
use crate::enums::output_format::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Review one snippet read from a file or stdin
    Analyze {
        #[clap(short, long, value_enum, default_value_t = Language::Python)]
        language: Language,
        /// Read the snippet from this file instead of stdin
        #[clap(short, long)]
        file: Option<PathBuf>,
        #[clap(long, value_enum)]
        format: Option<OutputFormat>,
        /// Save the validated report under the configured output directory
        #[clap(short, long)]
        save: bool,
    },
    /// Validate a saved raw model reply without calling the model
    Check {
        path: PathBuf,
        #[clap(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Start the local review page
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(long)]
        open: bool,
    },
    /// Validate the configuration file
    Validate,
}
