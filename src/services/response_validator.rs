use serde_json::{Map, Number, Value};
use crate::config::constants::{MAX_QUALITY_SCORE, MIN_QUALITY_SCORE};
use crate::enums::complexity::Complexity;
use crate::enums::severity::Severity;
use crate::errors::analysis_error::{AnalysisError, AnalysisOutcome};
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::issue::Issue;

const FENCE_MARKER: &str = "```";
const ROOT_FIELD: &str = "<root>";
const QUALITY_SCORE_FIELD: &str = "quality_score";
const ISSUES_FIELD: &str = "issues";
const SUGGESTIONS_FIELD: &str = "suggestions";
const COMPLEXITY_FIELD: &str = "complexity";
const BEST_PRACTICES_FIELD: &str = "best_practices";
const SECURITY_CONCERNS_FIELD: &str = "security_concerns";
const SEVERITY_FIELD: &str = "severity";
const ISSUE_FIELD: &str = "issue";
const LINE_FIELD: &str = "line";

/// Turns the model's raw reply into a validated [`AnalysisResult`].
///
/// The reply is untrusted text. Every field is checked and any deviation from
/// the report schema is an error; nothing is clamped, guessed or defaulted
/// except absent optional lists (empty) and an absent issue location (`None`).
/// `null` on an optional field counts as absent, `null` on a required field is
/// a violation.
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn parse(raw_text: &str) -> AnalysisOutcome<AnalysisResult> {
        let stripped = Self::strip_fences(raw_text);

        let value: Value = serde_json::from_str(stripped)
            .map_err(|e| AnalysisError::malformed(stripped, &e.to_string()))?;

        Self::validate(&value)
    }

    /// Removes leading and trailing code-fence markers (with an optional
    /// language tag on the opening one) and surrounding whitespace. Repeats
    /// until nothing changes, so applying it twice is the same as once.
    pub fn strip_fences(raw_text: &str) -> &str {
        let mut text = raw_text.trim();
        loop {
            let stripped = Self::strip_fence_once(text);
            if stripped.len() == text.len() {
                return text;
            }
            text = stripped;
        }
    }

    fn strip_fence_once(text: &str) -> &str {
        let mut remaining = text;

        if let Some(rest) = remaining.strip_prefix(FENCE_MARKER) {
            let tag_len = rest
                .find(|c: char| !Self::is_fence_tag_char(c))
                .unwrap_or(rest.len());
            let after_tag = &rest[tag_len..];
            let tag_ends = after_tag.is_empty()
                || after_tag.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '[');
            remaining = if tag_ends {
                after_tag
            } else {
                rest
            };
        }

        if let Some(rest) = remaining.strip_suffix(FENCE_MARKER) {
            remaining = rest;
        }

        remaining.trim()
    }

    fn is_fence_tag_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')
    }

    /// Shape and domain validation of an already parsed reply.
    pub fn validate(value: &Value) -> AnalysisOutcome<AnalysisResult> {
        let object = value.as_object().ok_or_else(|| {
            AnalysisError::shape(ROOT_FIELD, &format!("expected a JSON object, found {}", json_type(value)))
        })?;

        let quality_score = Self::parse_quality_score(object)?;
        let complexity = Self::parse_complexity(object)?;
        let issues = Self::parse_issues(object)?;
        let suggestions = Self::parse_string_list(object, SUGGESTIONS_FIELD)?;
        let best_practices = Self::parse_string_list(object, BEST_PRACTICES_FIELD)?;
        let security_concerns = Self::parse_string_list(object, SECURITY_CONCERNS_FIELD)?;

        Ok(AnalysisResult::new(
            quality_score,
            issues,
            suggestions,
            complexity,
            best_practices,
            security_concerns,
        ))
    }

    fn parse_quality_score(object: &Map<String, Value>) -> AnalysisOutcome<u8> {
        let number = match required(object, QUALITY_SCORE_FIELD)? {
            Value::Number(number) => number,
            other => {
                return Err(AnalysisError::shape(
                    QUALITY_SCORE_FIELD,
                    &format!("expected a number, found {}", json_type(other)),
                ))
            }
        };

        let score = integral_value(number).ok_or_else(|| {
            AnalysisError::domain(QUALITY_SCORE_FIELD, &number.to_string(), "must be a whole number")
        })?;

        if !(MIN_QUALITY_SCORE..=MAX_QUALITY_SCORE).contains(&score) {
            return Err(AnalysisError::domain(
                QUALITY_SCORE_FIELD,
                &number.to_string(),
                &format!("must be between {} and {}", MIN_QUALITY_SCORE, MAX_QUALITY_SCORE),
            ));
        }

        u8::try_from(score).map_err(|_| {
            AnalysisError::domain(QUALITY_SCORE_FIELD, &number.to_string(), "out of range")
        })
    }

    fn parse_complexity(object: &Map<String, Value>) -> AnalysisOutcome<Complexity> {
        let value = required_string(object, COMPLEXITY_FIELD, COMPLEXITY_FIELD)?;

        Complexity::from_wire(value).ok_or_else(|| {
            AnalysisError::domain(
                COMPLEXITY_FIELD,
                value,
                &format!("must be one of: {}", Complexity::VOCABULARY.join(", ")),
            )
        })
    }

    fn parse_issues(object: &Map<String, Value>) -> AnalysisOutcome<Vec<Issue>> {
        let Some(items) = optional_array(object, ISSUES_FIELD)? else {
            return Ok(Vec::new());
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::parse_issue(index, item))
            .collect()
    }

    fn parse_issue(index: usize, item: &Value) -> AnalysisOutcome<Issue> {
        let path = format!("{}[{}]", ISSUES_FIELD, index);
        let object = item.as_object().ok_or_else(|| {
            AnalysisError::shape(&path, &format!("expected an object, found {}", json_type(item)))
        })?;

        let severity_path = format!("{}.{}", path, SEVERITY_FIELD);
        let severity_value = required_string(object, SEVERITY_FIELD, &severity_path)?;
        let severity = Severity::from_wire(severity_value).ok_or_else(|| {
            AnalysisError::domain(
                &severity_path,
                severity_value,
                &format!("must be one of: {}", Severity::VOCABULARY.join(", ")),
            )
        })?;

        let issue_path = format!("{}.{}", path, ISSUE_FIELD);
        let issue = required_string(object, ISSUE_FIELD, &issue_path)?;
        if issue.trim().is_empty() {
            return Err(AnalysisError::domain(&issue_path, issue, "must not be empty"));
        }

        let line = match object.get(LINE_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(line)) => Some(line.clone()),
            Some(other) => {
                return Err(AnalysisError::shape(
                    &format!("{}.{}", path, LINE_FIELD),
                    &format!("expected a string, found {}", json_type(other)),
                ))
            }
        };

        Ok(Issue::new(severity, issue.to_string(), line))
    }

    fn parse_string_list(object: &Map<String, Value>, field: &str) -> AnalysisOutcome<Vec<String>> {
        let Some(items) = optional_array(object, field)? else {
            return Ok(Vec::new());
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let path = format!("{}[{}]", field, index);
                match item {
                    Value::String(text) if text.trim().is_empty() => {
                        Err(AnalysisError::domain(&path, text, "must not be empty"))
                    }
                    Value::String(text) => Ok(text.clone()),
                    other => Err(AnalysisError::shape(
                        &path,
                        &format!("expected a string, found {}", json_type(other)),
                    )),
                }
            })
            .collect()
    }
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> AnalysisOutcome<&'a Value> {
    match object.get(field) {
        None | Some(Value::Null) => Err(AnalysisError::shape(field, "missing required field")),
        Some(value) => Ok(value),
    }
}

fn required_string<'a>(object: &'a Map<String, Value>, key: &str, path: &str) -> AnalysisOutcome<&'a str> {
    match object.get(key) {
        None | Some(Value::Null) => Err(AnalysisError::shape(path, "missing required field")),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(AnalysisError::shape(
            path,
            &format!("expected a string, found {}", json_type(other)),
        )),
    }
}

fn optional_array<'a>(object: &'a Map<String, Value>, field: &str) -> AnalysisOutcome<Option<&'a Vec<Value>>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(AnalysisError::shape(
            field,
            &format!("expected an array, found {}", json_type(other)),
        )),
    }
}

/// Integer value of a JSON number, accepting floats only when they have no
/// fractional part (`85.0`).
fn integral_value(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    if number.is_u64() {
        // Larger than i64::MAX; report through the range check.
        return Some(i64::MAX);
    }
    let value = number.as_f64()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Some(if value < 0.0 { i64::MIN } else { i64::MAX });
    }
    Some(value as i64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_field(result: AnalysisOutcome<AnalysisResult>) -> (String, Option<String>) {
        match result {
            Err(AnalysisError::SchemaViolation { field, value, .. }) => (field, value),
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn accepts_plain_report() {
        let raw = r#"{"quality_score":85,"issues":[],"suggestions":["Add type hints"],"complexity":"low","best_practices":["Use docstrings"],"security_concerns":[]}"#;
        let result = ResponseValidator::parse(raw).unwrap();

        assert_eq!(result.quality_score(), 85);
        assert!(result.issues().is_empty());
        assert_eq!(result.suggestions(), ["Add type hints".to_string()]);
        assert_eq!(result.complexity(), Complexity::Low);
        assert_eq!(result.best_practices(), ["Use docstrings".to_string()]);
        assert!(result.security_concerns().is_empty());
    }

    #[test]
    fn accepts_fenced_report() {
        let raw = "```json\n{\"quality_score\":40,\"issues\":[{\"severity\":\"high\",\"issue\":\"SQL injection risk\",\"line\":\"query builder\"}],\"suggestions\":[],\"complexity\":\"high\",\"best_practices\":[],\"security_concerns\":[\"Unsanitized input\"]}\n```";
        let result = ResponseValidator::parse(raw).unwrap();

        assert_eq!(result.quality_score(), 40);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].severity(), Severity::High);
        assert_eq!(result.issues()[0].issue(), "SQL injection risk");
        assert_eq!(result.issues()[0].line(), Some("query builder"));
        assert_eq!(result.complexity(), Complexity::High);
        assert_eq!(result.security_concerns(), ["Unsanitized input".to_string()]);
    }

    #[test]
    fn rejects_prose_wrapped_truncated_reply() {
        let raw = r#"Sure! Here is the analysis: {"quality_score": 70, "issues": ["#;
        match ResponseValidator::parse(raw) {
            Err(AnalysisError::MalformedJson { text, .. }) => assert_eq!(text, raw),
            other => panic!("expected malformed json, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_complexity() {
        let raw = r#"{"quality_score":50,"complexity":"extreme"}"#;
        let (field, value) = schema_field(ResponseValidator::parse(raw));
        assert_eq!(field, "complexity");
        assert_eq!(value.as_deref(), Some("extreme"));
    }

    #[test]
    fn score_boundaries() {
        for accepted in [0, 100] {
            let raw = format!(r#"{{"quality_score":{},"complexity":"medium"}}"#, accepted);
            assert_eq!(ResponseValidator::parse(&raw).unwrap().quality_score() as i64, accepted);
        }
        for rejected in ["-1", "101", "18446744073709551615", "1e300"] {
            let raw = format!(r#"{{"quality_score":{},"complexity":"medium"}}"#, rejected);
            let (field, value) = schema_field(ResponseValidator::parse(&raw));
            assert_eq!(field, "quality_score");
            assert!(value.is_some());
        }
    }

    #[test]
    fn score_must_be_whole_number() {
        let whole = ResponseValidator::parse(r#"{"quality_score":85.0,"complexity":"low"}"#).unwrap();
        assert_eq!(whole.quality_score(), 85);

        let (field, value) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":85.5,"complexity":"low"}"#,
        ));
        assert_eq!(field, "quality_score");
        assert_eq!(value.as_deref(), Some("85.5"));
    }

    #[test]
    fn score_must_be_numeric() {
        let (field, value) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":"85","complexity":"low"}"#,
        ));
        assert_eq!(field, "quality_score");
        assert_eq!(value, None);
    }

    #[test]
    fn missing_required_fields_are_named() {
        let (field, _) = schema_field(ResponseValidator::parse(r#"{"complexity":"low"}"#));
        assert_eq!(field, "quality_score");

        let (field, _) = schema_field(ResponseValidator::parse(r#"{"quality_score":1}"#));
        assert_eq!(field, "complexity");

        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":null,"complexity":"low"}"#,
        ));
        assert_eq!(field, "quality_score");
    }

    #[test]
    fn absent_lists_become_empty() {
        let result = ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":null}"#,
        )
        .unwrap();
        assert!(result.issues().is_empty());
        assert!(result.suggestions().is_empty());
        assert!(result.best_practices().is_empty());
        assert!(result.security_concerns().is_empty());
    }

    #[test]
    fn list_fields_must_be_arrays() {
        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","suggestions":"use tabs"}"#,
        ));
        assert_eq!(field, "suggestions");
    }

    #[test]
    fn list_entries_must_be_non_empty_strings() {
        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","best_practices":["ok", 3]}"#,
        ));
        assert_eq!(field, "best_practices[1]");

        let (field, value) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","security_concerns":["  "]}"#,
        ));
        assert_eq!(field, "security_concerns[0]");
        assert_eq!(value.as_deref(), Some("  "));
    }

    #[test]
    fn issue_severity_and_text_are_checked() {
        let (field, value) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":[
                {"severity":"low","issue":"fine"},
                {"severity":"critical","issue":"bad"}]}"#,
        ));
        assert_eq!(field, "issues[1].severity");
        assert_eq!(value.as_deref(), Some("critical"));

        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":[{"severity":"low","issue":""}]}"#,
        ));
        assert_eq!(field, "issues[0].issue");

        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":[{"issue":"no severity"}]}"#,
        ));
        assert_eq!(field, "issues[0].severity");

        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":["just text"]}"#,
        ));
        assert_eq!(field, "issues[0]");
    }

    #[test]
    fn issue_line_distinguishes_absent_from_empty() {
        let result = ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":[
                {"severity":"low","issue":"a"},
                {"severity":"low","issue":"b","line":""},
                {"severity":"low","issue":"c","line":null}]}"#,
        )
        .unwrap();
        assert_eq!(result.issues()[0].line(), None);
        assert_eq!(result.issues()[1].line(), Some(""));
        assert_eq!(result.issues()[2].line(), None);

        let (field, _) = schema_field(ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":[{"severity":"low","issue":"a","line":12}]}"#,
        ));
        assert_eq!(field, "issues[0].line");
    }

    #[test]
    fn issue_order_is_preserved_without_dedup() {
        let result = ResponseValidator::parse(
            r#"{"quality_score":10,"complexity":"low","issues":[
                {"severity":"low","issue":"same"},
                {"severity":"high","issue":"other"},
                {"severity":"low","issue":"same"}]}"#,
        )
        .unwrap();
        let texts: Vec<&str> = result.issues().iter().map(Issue::issue).collect();
        assert_eq!(texts, ["same", "other", "same"]);
    }

    #[test]
    fn top_level_must_be_an_object() {
        let (field, _) = schema_field(ResponseValidator::parse("[1, 2]"));
        assert_eq!(field, ROOT_FIELD);
    }

    #[test]
    fn strips_fence_variants() {
        assert_eq!(ResponseValidator::strip_fences("```json\n{}\n```"), "{}");
        assert_eq!(ResponseValidator::strip_fences("  ```\n{}\n```  \n"), "{}");
        assert_eq!(ResponseValidator::strip_fences("```{}```"), "{}");
        assert_eq!(ResponseValidator::strip_fences("{}\n```"), "{}");
        assert_eq!(ResponseValidator::strip_fences("\n\n{}\n"), "{}");
    }

    #[test]
    fn strips_tag_glued_to_body() {
        let raw = r#"```json{"quality_score":50,"complexity":"low"}```"#;
        assert_eq!(
            ResponseValidator::strip_fences(raw),
            r#"{"quality_score":50,"complexity":"low"}"#
        );
        assert_eq!(ResponseValidator::parse(raw).map(|r| r.quality_score()), Ok(50));
        assert_eq!(ResponseValidator::strip_fences("```json[1]```"), "[1]");
    }

    #[test]
    fn fence_stripping_leaves_interior_alone() {
        let raw = "```json\n{\"suggestions\":[\"wrap in ```code```\"]}\n```";
        assert_eq!(
            ResponseValidator::strip_fences(raw),
            "{\"suggestions\":[\"wrap in ```code```\"]}"
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let result = ResponseValidator::parse(
            r#"{"quality_score":99,"complexity":"low","summary":"extra"}"#,
        )
        .unwrap();
        assert_eq!(result.quality_score(), 99);
    }
}
