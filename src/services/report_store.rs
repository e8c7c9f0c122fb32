use std::fs;
use std::path::PathBuf;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::errors::SnippetReviewError;
use crate::enums::language::Language;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::saved_report::SavedReport;

/// Writes successful reports as JSON files.
pub struct ReportStore {
    output_dir: PathBuf,
}

impl ReportStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn save(&self, language: Language, result: &AnalysisResult) -> Result<PathBuf, SnippetReviewError> {
        let report = SavedReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            language,
            result: result.clone(),
        };
        self.write(&report)
    }

    pub fn write(&self, report: &SavedReport) -> Result<PathBuf, SnippetReviewError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            SnippetReviewError::file_error(&self.output_dir.display().to_string(), "create output directory", &e.to_string())
        })?;

        let path = self.output_dir.join(Self::file_name(&report.created_at, &report.id));
        let content = serde_json::to_string_pretty(report)?;
        fs::write(&path, content)
            .map_err(|e| SnippetReviewError::file_error(&path.display().to_string(), "write report", &e.to_string()))?;

        log::info!("💾 Saved report to {}", path.display());
        Ok(path)
    }

    fn file_name(created_at: &DateTime<Utc>, id: &Uuid) -> String {
        let short_id: String = id.simple().to_string().chars().take(8).collect();
        format!("review-{}-{}.json", created_at.format("%Y%m%d-%H%M%S"), short_id)
    }
}
