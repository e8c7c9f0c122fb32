pub mod ai;
pub mod analysis_request;
pub mod analysis_result;
pub mod api_response;
pub mod cli;
pub mod config;
pub mod issue;
pub mod outbound_payload;
pub mod saved_report;
