//! DTOs for the programmatic shortening endpoint.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api`.
///
/// - `custom` alone probes availability of a code.
/// - `url` alone allocates with a generated code.
/// - `url` + `custom` allocates with the chosen code.
#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    pub url: Option<String>,
    pub custom: Option<String>,
}

/// Response body for `GET /api`.
///
/// Follows the service's long-standing API contract: HTTP status is always
/// 200 and the outcome is carried by the `code` field (200 or 400).
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok_url(url: String) -> Self {
        Self {
            code: 200,
            url: Some(url),
            description: None,
            error: None,
        }
    }

    pub fn ok_description(description: impl Into<String>) -> Self {
        Self {
            code: 200,
            url: None,
            description: Some(description.into()),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            code: 400,
            url: None,
            description: None,
            error: Some(error.into()),
        }
    }
}
