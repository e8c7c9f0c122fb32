pub mod analysis_error;

use std::fmt;
use std::error::Error as StdError;
use serde::Serialize;
use crate::enums::ai_provider_error::AiProviderError;
use crate::errors::analysis_error::AnalysisError;
use crate::services::error_classifier::ErrorClassifier;
use crate::ui::review_session::{SessionError, SubmitError};

/// Errors surfaced by the command-line application around the analysis core.
#[derive(Debug, Clone, Serialize)]
pub enum SnippetReviewError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // Provider client could not be set up
    ProviderError {
        reason: String,
    },

    // A finished analysis that failed
    AnalysisFailed(AnalysisError),

    // Single-flight gate was closed
    ReviewBusy,

    // Web surface errors
    ServerError {
        operation: String,
        reason: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },

    // Multiple errors (configuration validation)
    MultipleErrors {
        errors: Vec<SnippetReviewError>,
        context: String,
    },
}

impl SnippetReviewError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn server_error(operation: &str, reason: &str) -> Self {
        Self::ServerError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AnalysisFailed(error) => ErrorClassifier::retryable_by_user(ErrorClassifier::classify(error)),
            Self::ReviewBusy => true,
            Self::ConfigurationError { .. } => true,
            Self::SystemError { .. } => false,
            Self::MultipleErrors { errors, .. } => errors.iter().any(|e| e.is_recoverable()),
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::ServerError { .. } => ErrorSeverity::High,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::ProviderError { .. } => ErrorSeverity::High,
            Self::AnalysisFailed(_) => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ReviewBusy => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::MultipleErrors { errors, .. } => {
                errors.iter()
                    .map(|e| e.severity())
                    .max()
                    .unwrap_or(ErrorSeverity::Low)
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg
            }
            Self::ProviderError { reason } => {
                format!("Could not set up the model client: {}", reason)
            }
            Self::AnalysisFailed(error) => {
                let kind = ErrorClassifier::classify(error);
                format!("{}\n   [{}] {}", ErrorClassifier::user_notice(kind), kind.name(), error)
            }
            Self::ReviewBusy => {
                "An analysis is already running\n💡 Wait for it to finish and submit again".to_string()
            }
            Self::ServerError { operation, reason } => {
                format!("Server error during {}: {}", operation, reason)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
            Self::MultipleErrors { errors, context } => {
                let mut msg = format!("Multiple errors occurred during {}:\n", context);
                for (i, error) in errors.iter().enumerate() {
                    msg.push_str(&format!("  {}. {}\n", i + 1, error.user_message().replace('\n', "\n     ")));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for SnippetReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for SnippetReviewError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for application operations
pub type SnippetReviewResult<T> = Result<T, SnippetReviewError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Log technical details and print the user-facing message.
    pub fn handle_error(error: &SnippetReviewError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());

        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

impl From<std::io::Error> for SnippetReviewError {
    fn from(error: std::io::Error) -> Self {
        SnippetReviewError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SnippetReviewError {
    fn from(error: serde_json::Error) -> Self {
        SnippetReviewError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SnippetReviewError {
    fn from(error: toml::de::Error) -> Self {
        SnippetReviewError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

impl From<AiProviderError> for SnippetReviewError {
    fn from(error: AiProviderError) -> Self {
        SnippetReviewError::ProviderError {
            reason: error.to_string(),
        }
    }
}

impl From<AnalysisError> for SnippetReviewError {
    fn from(error: AnalysisError) -> Self {
        SnippetReviewError::AnalysisFailed(error)
    }
}

impl From<SubmitError> for SnippetReviewError {
    fn from(error: SubmitError) -> Self {
        match error {
            SubmitError::Analysis(error) => SnippetReviewError::AnalysisFailed(error),
            SubmitError::Session(SessionError::AlreadyInFlight) => SnippetReviewError::ReviewBusy,
            SubmitError::Session(other) => SnippetReviewError::system_error("review session", &other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_failures_carry_classified_notice() {
        let error = SnippetReviewError::from(AnalysisError::network("timeout", None));
        assert!(error.user_message().contains("Analysis failed. Please try again."));
        assert!(error.user_message().contains("NETWORK"));
        assert!(error.is_recoverable());

        let empty = SnippetReviewError::from(AnalysisError::EmptyInput);
        assert!(!empty.is_recoverable());
    }

    #[test]
    fn busy_gate_maps_to_review_busy() {
        let error = SnippetReviewError::from(SubmitError::Session(SessionError::AlreadyInFlight));
        assert!(matches!(error, SnippetReviewError::ReviewBusy));
        assert_eq!(error.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn multiple_errors_take_highest_severity() {
        let error = SnippetReviewError::MultipleErrors {
            errors: vec![
                SnippetReviewError::config_error("bad model", Some("ai.model"), None),
                SnippetReviewError::file_error("/tmp/x", "read", "denied"),
            ],
            context: "configuration validation".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::High);
        assert!(error.user_message().contains("1. Configuration Error: bad model"));
    }
}
