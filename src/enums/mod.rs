pub mod ai_provider_error;
pub mod commands;
pub mod complexity;
pub mod error_kind;
pub mod language;
pub mod output_format;
pub mod review_state;
pub mod severity;
