use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AiProviderError {
    ApiError { status_code: u16, message: String },
    NetworkError(String),
    SerializationError(String),
    AuthenticationError(String),
    Timeout(u64),
}

impl fmt::Display for AiProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AiProviderError::ApiError { status_code, message } => write!(f, "API Error (HTTP {}): {}", status_code, message),
            AiProviderError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AiProviderError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            AiProviderError::AuthenticationError(msg) => write!(f, "Authentication Error: {}", msg),
            AiProviderError::Timeout(secs) => write!(f, "Request timed out after {}s", secs),
        }
    }
}

impl Error for AiProviderError {}
