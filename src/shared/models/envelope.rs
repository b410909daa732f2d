//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Successful response wrapper: `{ statusCode, data, message, success }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status_code: Some(200),
            data,
            message: None,
            success: Some(true),
        }
    }
}

/// Error body: `{ message }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
