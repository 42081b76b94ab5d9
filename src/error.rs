//! Application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// The error taxonomy shared by every layer.
///
/// Each variant maps to one HTTP status; `details` carries machine-readable
/// context for the body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 400 - malformed input (bad URL, bad code, bad form).
    #[error("{message}")]
    Validation { message: String, details: Value },
    /// 401 - missing or bad credentials.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    /// 403 - authenticated but not the owner.
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    /// 404 - no such link or account.
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// 409 - code or email already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },
    /// 503 - the code allocator ran out of attempts.
    #[error("{message}")]
    Exhausted { message: String, details: Value },
    /// 500 - everything else.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::Exhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Exhausted { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "exhausted",
                message,
                details,
            ),
            AppError::Internal { message, details } => {
                tracing::error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    message,
                    details,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps low-level sqlx errors into the taxonomy.
///
/// Unique-index violations become [`AppError::Conflict`]; anything else is an
/// internal error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|field| field.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "invalid input".to_string());

        AppError::bad_request(message, json!(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::bad_request("m", json!({})).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::unauthorized("m", json!({})).into_response(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::forbidden("m", json!({})).into_response(),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::not_found("m", json!({})).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::conflict("m", json!({})).into_response(),
                StatusCode::CONFLICT,
            ),
            (
                AppError::exhausted("m", json!({})).into_response(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::internal("m", json!({})).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_display_is_the_message() {
        let err = AppError::conflict("code already exists", json!({ "code": "promo" }));
        assert_eq!(err.to_string(), "code already exists");
    }

    #[test]
    fn test_validator_errors_become_bad_request() {
        #[derive(Validate)]
        struct Form {
            #[validate(length(min = 1, message = "please fill out all fields"))]
            name: String,
        }

        let form = Form {
            name: String::new(),
        };
        let err: AppError = form.validate().unwrap_err().into();

        match err {
            AppError::Validation { message, .. } => {
                assert_eq!(message, "please fill out all fields");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
