use serde::{Deserialize, Serialize};

/// The four failure kinds a single analysis can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    Network,
    MalformedJson,
    SchemaViolation,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::Network => "NETWORK",
            Self::MalformedJson => "MALFORMED_JSON",
            Self::SchemaViolation => "SCHEMA_VIOLATION",
        }
    }
}
