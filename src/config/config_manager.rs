use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, SUPPORTED_PROVIDERS};
use crate::errors::{SnippetReviewError, SnippetReviewResult};
use crate::structs::config::config::Config;

const SAMPLE_CONFIG: &str = r#"# Snippet Review Configuration

# AI Configuration
[ai]
provider = "anthropic"
model = "claude-sonnet-4-20250514"
# Upper bound on the length of the model reply
max_tokens = 1000
# Environment variable holding the API key
api_key_env = "ANTHROPIC_API_KEY"
base_url = "https://api.anthropic.com/v1"
# A request with no reply after this many seconds fails as a network error
timeout_secs = 60

# Output Configuration
[output]
# "text" or "json"
format = "text"
# Save every successful report as JSON
save_reports = false
output_dir = "./snippet-review-results"

# Local review page
[server]
# 0 picks the first free port from 8080
port = 0
open_browser = true
"#;

pub struct ConfigManager;

impl ConfigManager {
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the explicit path when given (it must exist), otherwise the
    /// default location when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> SnippetReviewResult<Config> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(SnippetReviewError::ConfigurationFileError {
                    path: path.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            return Self::load_from(path);
        }

        match Self::default_config_path() {
            Some(default_path) if default_path.exists() => Self::load_from(&default_path),
            _ => {
                log::debug!("📋 No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> SnippetReviewResult<Config> {
        log::info!("📋 Loading config from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| SnippetReviewError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SnippetReviewError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })
    }

    pub fn create_sample_config(path: Option<&Path>) -> SnippetReviewResult<PathBuf> {
        let config_file_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path().ok_or_else(|| {
                SnippetReviewError::system_error("locate home directory", "home directory is not available")
            })?,
        };

        if config_file_path.exists() {
            return Err(SnippetReviewError::ConfigurationFileError {
                path: config_file_path.display().to_string(),
                reason: "file already exists".to_string(),
            });
        }

        if let Some(parent) = config_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_file_path, SAMPLE_CONFIG)?;

        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(config_file_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !SUPPORTED_PROVIDERS.contains(&config.ai.provider.as_str()) {
            errors.push(format!(
                "Unsupported AI provider '{}', expected one of: {}",
                config.ai.provider,
                SUPPORTED_PROVIDERS.join(", ")
            ));
        }

        if config.ai.model.trim().is_empty() {
            errors.push("AI model must not be empty".to_string());
        }

        if config.ai.max_tokens == 0 {
            errors.push("max_tokens must be greater than 0".to_string());
        }

        if config.ai.timeout_secs == 0 {
            errors.push("timeout_secs must be greater than 0".to_string());
        }

        if !(config.ai.base_url.starts_with("http://") || config.ai.base_url.starts_with("https://")) {
            errors.push(format!("base_url must be an http(s) URL: {}", config.ai.base_url));
        }

        if config.ai.api_key_env.trim().is_empty() {
            errors.push("api_key_env must name an environment variable".to_string());
        }

        if config.output.output_dir.trim().is_empty() {
            errors.push("output_dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::output_format::OutputFormat;
    use crate::structs::config::server_config::ServerConfig;
    use tempfile::TempDir;

    #[test]
    fn sample_config_round_trips_to_defaults() {
        let config: Config = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert!(ConfigManager::validate_config(&config).is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[ai]\nmodel = \"other-model\"\n").unwrap();
        assert_eq!(config.ai.model, "other-model");
        assert_eq!(config.ai.max_tokens, 1000);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.server, ServerConfig::default());
        assert!(config.server.open_browser);
    }

    #[test]
    fn writes_and_loads_sample_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = ConfigManager::create_sample_config(Some(&path)).unwrap();
        assert_eq!(written, path);

        let config = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(config.ai.provider, "anthropic");

        assert!(matches!(
            ConfigManager::create_sample_config(Some(&path)),
            Err(SnippetReviewError::ConfigurationFileError { .. })
        ));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigManager::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(SnippetReviewError::ConfigurationFileError { .. })));
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ai\nmodel = ").unwrap();

        match ConfigManager::load(Some(&path)) {
            Err(SnippetReviewError::ConfigurationFileError { path: reported, .. }) => {
                assert!(reported.ends_with("config.toml"));
            }
            other => panic!("expected configuration file error, got {:?}", other),
        }
    }

    #[test]
    fn validation_lists_every_problem() {
        let mut config = Config::default();
        config.ai.provider = "openai".to_string();
        config.ai.max_tokens = 0;
        config.ai.timeout_secs = 0;
        config.ai.base_url = "ftp://example".to_string();

        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("openai"));
    }
}
