use crate::enums::language::Language;

pub const REPORT_FIELD_NAMES: &[&str] = &[
    "quality_score",
    "issues",
    "suggestions",
    "complexity",
    "best_practices",
    "security_concerns",
];

/// Renders the fixed review instructions around the snippet. The language tag
/// and the snippet are embedded verbatim; nothing in the snippet is escaped or
/// interpreted.
pub fn code_review_prompt(language: Language, source_code: &str) -> String {
    format!(
        r#"You are an expert code reviewer. Analyze this {language} code and respond ONLY with a JSON object (no markdown, no backticks, no code fences, no text before or after the object) with this exact structure:
{{
  "quality_score": <integer 0-100>,
  "issues": [
    {{"severity": "high|medium|low", "issue": "description", "line": "affected area"}}
  ],
  "suggestions": ["suggestion1", "suggestion2"],
  "complexity": "low|medium|high",
  "best_practices": ["practice1", "practice2"],
  "security_concerns": ["concern1"] or []
}}

Rules:
- "severity" MUST be exactly one of: high, medium, low
- "complexity" MUST be exactly one of: low, medium, high
- "quality_score" MUST be a whole number between 0 and 100
- Every string in the lists MUST be non-empty
- Do NOT wrap the JSON in ``` fences

Code to analyze:
{source_code}"#,
        language = language.tag(),
        source_code = source_code,
    )
}
