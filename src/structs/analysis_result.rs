use serde::Serialize;
use crate::enums::complexity::Complexity;
use crate::structs::issue::Issue;

/// A fully validated code-review report.
///
/// Only the response validator constructs this type, so every instance
/// satisfies the report schema: the score is within `0..=100`, every list is
/// present (possibly empty) and every string entry is non-empty. Serializing
/// it yields the same JSON shape the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    quality_score: u8,
    issues: Vec<Issue>,
    suggestions: Vec<String>,
    complexity: Complexity,
    best_practices: Vec<String>,
    security_concerns: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(
        quality_score: u8,
        issues: Vec<Issue>,
        suggestions: Vec<String>,
        complexity: Complexity,
        best_practices: Vec<String>,
        security_concerns: Vec<String>,
    ) -> Self {
        Self {
            quality_score,
            issues,
            suggestions,
            complexity,
            best_practices,
            security_concerns,
        }
    }

    pub fn quality_score(&self) -> u8 {
        self.quality_score
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn best_practices(&self) -> &[String] {
        &self.best_practices
    }

    pub fn security_concerns(&self) -> &[String] {
        &self.security_concerns
    }
}
