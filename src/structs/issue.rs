use serde::Serialize;
use crate::enums::severity::Severity;

/// One finding reported by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    severity: Severity,
    issue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<String>,
}

impl Issue {
    pub(crate) fn new(severity: Severity, issue: String, line: Option<String>) -> Self {
        Self { severity, issue, line }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    /// Free-form location hint. `None` means the model gave no location,
    /// `Some("")` means it gave an empty one.
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }
}
