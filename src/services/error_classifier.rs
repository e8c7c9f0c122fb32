use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::error_kind::ErrorKind;
use crate::errors::analysis_error::AnalysisError;

/// Maps failures from every stage of an analysis onto the four reported kinds.
/// Pure mapping, no I/O.
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn classify(error: &AnalysisError) -> ErrorKind {
        match error {
            AnalysisError::EmptyInput => ErrorKind::EmptyInput,
            AnalysisError::Network { .. } => ErrorKind::Network,
            AnalysisError::MalformedJson { .. } => ErrorKind::MalformedJson,
            AnalysisError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
        }
    }

    /// Provider failures are transport failures, except a reply body that
    /// could not be decoded, which is a malformed reply.
    pub fn from_provider_error(error: AiProviderError) -> AnalysisError {
        match error {
            AiProviderError::ApiError { status_code, message } => {
                AnalysisError::network(&message, Some(status_code))
            }
            AiProviderError::AuthenticationError(message) => {
                AnalysisError::network(&format!("authentication failed: {}", message), Some(401))
            }
            AiProviderError::NetworkError(message) => AnalysisError::network(&message, None),
            AiProviderError::Timeout(secs) => {
                AnalysisError::network(&format!("no reply within {}s", secs), None)
            }
            AiProviderError::SerializationError(message) => {
                AnalysisError::malformed("", &format!("provider reply body: {}", message))
            }
        }
    }

    /// Single notice shown to the user for a failed analysis.
    pub fn user_notice(kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::EmptyInput => "Please enter some code to analyze.",
            ErrorKind::Network => "Analysis failed. Please try again.",
            ErrorKind::MalformedJson => "Analysis failed: the model reply could not be read.",
            ErrorKind::SchemaViolation => "Analysis failed: the model reply did not match the report format.",
        }
    }

    /// Whether resubmitting the same input can succeed. Empty input needs the
    /// user to act first.
    pub fn retryable_by_user(kind: ErrorKind) -> bool {
        !matches!(kind, ErrorKind::EmptyInput)
    }

    pub fn http_status(kind: ErrorKind) -> u16 {
        match kind {
            ErrorKind::EmptyInput | ErrorKind::SchemaViolation => 422,
            ErrorKind::Network | ErrorKind::MalformedJson => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_analysis_error() {
        assert_eq!(ErrorClassifier::classify(&AnalysisError::EmptyInput), ErrorKind::EmptyInput);
        assert_eq!(ErrorClassifier::classify(&AnalysisError::network("down", None)), ErrorKind::Network);
        assert_eq!(ErrorClassifier::classify(&AnalysisError::malformed("x", "eof")), ErrorKind::MalformedJson);
        assert_eq!(
            ErrorClassifier::classify(&AnalysisError::shape("complexity", "missing")),
            ErrorKind::SchemaViolation
        );
    }

    #[test]
    fn provider_failures_become_network_errors() {
        let cases = vec![
            AiProviderError::ApiError { status_code: 529, message: "overloaded".to_string() },
            AiProviderError::AuthenticationError("bad key".to_string()),
            AiProviderError::NetworkError("connection refused".to_string()),
            AiProviderError::Timeout(30),
        ];
        for case in cases {
            let error = ErrorClassifier::from_provider_error(case);
            assert_eq!(ErrorClassifier::classify(&error), ErrorKind::Network);
        }
    }

    #[test]
    fn undecodable_provider_body_is_malformed() {
        let error = ErrorClassifier::from_provider_error(AiProviderError::SerializationError(
            "expected value".to_string(),
        ));
        assert_eq!(ErrorClassifier::classify(&error), ErrorKind::MalformedJson);
    }

    #[test]
    fn keeps_status_code_of_api_errors() {
        let error = ErrorClassifier::from_provider_error(AiProviderError::ApiError {
            status_code: 500,
            message: "boom".to_string(),
        });
        assert_eq!(error, AnalysisError::network("boom", Some(500)));
    }

    #[test]
    fn only_empty_input_needs_user_action() {
        assert!(!ErrorClassifier::retryable_by_user(ErrorKind::EmptyInput));
        assert!(ErrorClassifier::retryable_by_user(ErrorKind::Network));
        assert!(ErrorClassifier::retryable_by_user(ErrorKind::MalformedJson));
        assert!(ErrorClassifier::retryable_by_user(ErrorKind::SchemaViolation));
    }
}
