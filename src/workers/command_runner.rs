use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::language::Language;
use crate::enums::output_format::OutputFormat;
use crate::errors::analysis_error::AnalysisError;
use crate::errors::{SnippetReviewError, SnippetReviewResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::services::code_reviewer::CodeReviewer;
use crate::services::error_classifier::ErrorClassifier;
use crate::services::report_store::ReportStore;
use crate::services::response_validator::ResponseValidator;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::api_response::ApiResponse;
use crate::structs::config::config::Config;
use crate::ui::report_renderer::ReportRenderer;
use crate::ui::review_server::ReviewServer;
use crate::ui::review_session::SharedReviewSession;

pub struct CommandRunner {
    config_path: Option<PathBuf>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> SnippetReviewResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Analyze { language, file, format, save } => {
                self.analyze_command(language, file.as_deref(), format, save).await
            }
            Commands::Check { path, format } => self.check_command(&path, format),
            Commands::Serve { port, open } => self.serve_command(port, open).await,
            Commands::Validate => self.validate_command(),
        };

        if let Some(start) = self.start_time {
            log::debug!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> SnippetReviewResult<()> {
        log::info!("🚀 Initializing snippet-review configuration...");

        match ConfigManager::create_sample_config(self.config_path.as_deref()) {
            Ok(path) => {
                log::info!("✅ Configuration file created at {}", path.display());
                log::info!("🔑 Export ANTHROPIC_API_KEY before running 'snippet-review analyze'.");
                log::info!("🔧 Run 'snippet-review validate' to check your configuration.");
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                Err(e)
            }
        }
    }

    async fn analyze_command(
        &self,
        language: Language,
        file: Option<&Path>,
        format: Option<OutputFormat>,
        save: bool,
    ) -> SnippetReviewResult<()> {
        let config = self.load_config()?;
        let format = format.unwrap_or(config.output.format);

        let request = AnalysisRequest::new(Self::read_source(file)?, language);
        let reviewer = CodeReviewer::from_config(&config.ai)?;
        let session = SharedReviewSession::new();

        let mut spinner = AnimatedLogger::for_request(&request);
        if !request.is_blank() {
            spinner.start();
        }

        let outcome = session.submit(&reviewer, &request).await;
        spinner.finish(&outcome).await;

        match outcome {
            Ok(result) => {
                Self::print_result(&result, format)?;

                if save || config.output.save_reports {
                    ReportStore::new(&config.output.output_dir).save(language, &result)?;
                }
                Ok(())
            }
            Err(e) => {
                let error = SnippetReviewError::from(e);
                if let SnippetReviewError::AnalysisFailed(analysis_error) = &error {
                    Self::print_failure(analysis_error, format)?;
                }
                Err(error)
            }
        }
    }

    /// Validates a raw model reply saved to disk, exactly as a live reply would be.
    fn check_command(&self, path: &Path, format: Option<OutputFormat>) -> SnippetReviewResult<()> {
        let format = format.unwrap_or_default();
        log::info!("🔎 Checking model reply: {}", path.display());

        let raw_text = fs::read_to_string(path)
            .map_err(|e| SnippetReviewError::file_error(&path.display().to_string(), "read", &e.to_string()))?;

        match ResponseValidator::parse(&raw_text) {
            Ok(result) => Self::print_result(&result, format),
            Err(error) => {
                Self::print_failure(&error, format)?;
                Err(SnippetReviewError::AnalysisFailed(error))
            }
        }
    }

    async fn serve_command(&self, port: Option<u16>, open: bool) -> SnippetReviewResult<()> {
        log::info!("🌐 Starting snippet-review page...");

        let config = self.load_config()?;
        let reviewer = CodeReviewer::from_config(&config.ai)?;
        let mut server = ReviewServer::new(reviewer);

        let port = server.start(port.unwrap_or(config.server.port)).await?;
        let url = format!("http://127.0.0.1:{}", port);
        log::info!("🚀 Review page available at: {}", url);

        if open || config.server.open_browser {
            if let Err(e) = webbrowser::open(&url) {
                log::warn!("⚠️ Could not open browser: {}", e);
            }
        }

        log::info!("⏹️ Press Ctrl+C to stop the server");
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| SnippetReviewError::system_error("wait for Ctrl+C", &e.to_string()))?;

        server.shutdown().await
    }

    fn validate_command(&self) -> SnippetReviewResult<()> {
        log::info!("🔍 Validating snippet-review configuration...");

        let config = match self.load_config() {
            Ok(config) => {
                log::info!("✅ Configuration loaded successfully");
                config
            }
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'snippet-review init' to create a configuration file.");
                return Err(e);
            }
        };

        if let Err(problems) = ConfigManager::validate_config(&config) {
            return Err(SnippetReviewError::MultipleErrors {
                errors: problems
                    .iter()
                    .map(|problem| SnippetReviewError::config_error(problem, None, None))
                    .collect(),
                context: "configuration validation".to_string(),
            });
        }

        if std::env::var(&config.ai.api_key_env).is_err() {
            log::warn!("⚠️ {} is not set; requests will be rejected by the API", config.ai.api_key_env);
        }

        log::info!("✅ Configuration is valid");
        log::info!("🤖 Model: {} (max {} tokens)", config.ai.model, config.ai.max_tokens);
        log::info!("📁 Reports directory: {}", config.output.output_dir);

        Ok(())
    }

    fn load_config(&self) -> SnippetReviewResult<Config> {
        ConfigManager::load(self.config_path.as_deref())
    }

    fn read_source(file: Option<&Path>) -> SnippetReviewResult<String> {
        match file {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| SnippetReviewError::file_error(&path.display().to_string(), "read", &e.to_string())),
            None => {
                let mut source_code = String::new();
                io::stdin()
                    .read_to_string(&mut source_code)
                    .map_err(|e| SnippetReviewError::system_error("read stdin", &e.to_string()))?;
                Ok(source_code)
            }
        }
    }

    fn print_result(result: &AnalysisResult, format: OutputFormat) -> SnippetReviewResult<()> {
        match format {
            OutputFormat::Text => print!("{}", ReportRenderer::for_terminal().render(result)),
            OutputFormat::Json => println!("{}", ReportRenderer::render_json(result)?),
        }
        Ok(())
    }

    fn print_failure(error: &AnalysisError, format: OutputFormat) -> SnippetReviewResult<()> {
        match format {
            OutputFormat::Text => print!("{}", ReportRenderer::for_terminal().render_failure(error)),
            OutputFormat::Json => {
                let kind = ErrorClassifier::classify(error);
                let reply = ApiResponse::<()>::failure(
                    ErrorClassifier::user_notice(kind),
                    Some(kind),
                    error.field().map(str::to_string),
                );
                println!("{}", serde_json::to_string_pretty(&reply)?);
            }
        }
        Ok(())
    }
}
