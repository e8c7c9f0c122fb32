pub mod ai_providers;
pub mod code_reviewer;
pub mod error_classifier;
pub mod report_store;
pub mod request_builder;
pub mod response_validator;
