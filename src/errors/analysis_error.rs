use serde::Serialize;
use thiserror::Error;

/// Terminal outcome of a failed analysis. Every variant ends the current
/// request; nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("no code was submitted")]
    EmptyInput,

    #[error("analysis request failed: {reason}")]
    Network {
        reason: String,
        status_code: Option<u16>,
    },

    #[error("model reply is not well-formed JSON: {reason}")]
    MalformedJson {
        reason: String,
        text: String,
    },

    #[error("model reply violates the report schema at '{field}': {reason}")]
    SchemaViolation {
        field: String,
        value: Option<String>,
        reason: String,
    },
}

impl AnalysisError {
    pub fn network(reason: &str, status_code: Option<u16>) -> Self {
        Self::Network {
            reason: reason.to_string(),
            status_code,
        }
    }

    pub fn malformed(text: &str, reason: &str) -> Self {
        Self::MalformedJson {
            reason: reason.to_string(),
            text: text.to_string(),
        }
    }

    /// Missing or mistyped field.
    pub fn shape(field: &str, reason: &str) -> Self {
        Self::SchemaViolation {
            field: field.to_string(),
            value: None,
            reason: reason.to_string(),
        }
    }

    /// Field present with the right type but an illegal value.
    pub fn domain(field: &str, value: &str, reason: &str) -> Self {
        Self::SchemaViolation {
            field: field.to_string(),
            value: Some(value.to_string()),
            reason: reason.to_string(),
        }
    }

    /// Offending field for schema violations, `None` for the other kinds.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::SchemaViolation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type AnalysisOutcome<T> = Result<T, AnalysisError>;
