use serde::{Deserialize, Serialize};
use crate::enums::language::Language;

/// A snippet and the language it was declared as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    source_code: String,
    language: Language,
}

impl AnalysisRequest {
    pub fn new(source_code: impl Into<String>, language: Language) -> Self {
        Self {
            source_code: source_code.into(),
            language,
        }
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// True when there is nothing but whitespace to review.
    pub fn is_blank(&self) -> bool {
        self.source_code.trim().is_empty()
    }
}
