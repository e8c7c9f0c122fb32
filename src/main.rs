use clap::Parser;
use snippet_review::errors::{ErrorHandler, SnippetReviewError};
use snippet_review::structs::cli::Cli;
use snippet_review::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let mut runner = CommandRunner::new(cli.config);
    if let Err(error) = runner.run_command(cli.command).await {
        // Analysis failures have already been rendered as the command output.
        if let SnippetReviewError::AnalysisFailed(analysis_error) = &error {
            log::debug!("Analysis failed: {:?}", analysis_error);
        } else {
            ErrorHandler::handle_error(&error);
        }
        std::process::exit(1);
    }
}
