use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::enums::language::Language;
use crate::structs::analysis_result::AnalysisResult;

#[derive(Debug, Clone, Serialize)]
pub struct SavedReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub language: Language,
    pub result: AnalysisResult,
}
