use serde::Serialize;
use crate::enums::error_kind::ErrorKind;

/// Envelope for every JSON reply of the review page API.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Analysis complete".to_string(),
            error_kind: None,
            field: None,
        }
    }

    pub fn failure(message: &str, error_kind: Option<ErrorKind>, field: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.to_string(),
            error_kind,
            field,
        }
    }
}
