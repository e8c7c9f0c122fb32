use serde::Serialize;
use crate::errors::analysis_error::AnalysisError;
use crate::structs::analysis_result::AnalysisResult;

/// Where the current analysis stands. Transitions:
/// `Idle -> InFlight`, `InFlight -> Succeeded | Failed`,
/// `Succeeded | Failed -> InFlight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ReviewState {
    Idle,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

impl Default for ReviewState {
    fn default() -> Self {
        ReviewState::Idle
    }
}
