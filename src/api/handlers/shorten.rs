//! Handler for the programmatic shortening endpoint.

use axum::{Json, extract::Query, extract::State};

use crate::api::dto::shorten::{ApiQuery, ApiResponse};
use crate::state::AppState;

/// Availability probe and anonymous allocation.
///
/// # Endpoint
///
/// `GET /api?url=&custom=`
///
/// # Behavior
///
/// - `custom` alone: reports whether the code is free.
/// - `url` alone: allocates with a generated code.
/// - `url` + `custom`: allocates with the chosen code.
/// - neither: asks for the `url` parameter.
///
/// Links created here are anonymous (no owner), so they can never be renamed.
///
/// # Response
///
/// Always HTTP 200; the body carries the outcome:
///
/// ```json
/// { "code": 200, "url": "https://lnk.example/url/aB3xY9z" }
/// { "code": 400, "error": "code already exists" }
/// ```
pub async fn api_handler(
    State(state): State<AppState>,
    Query(params): Query<ApiQuery>,
) -> Json<ApiResponse> {
    let response = match (params.url, params.custom) {
        (None, Some(custom)) => match state.registry.check_availability(&custom).await {
            Ok(true) => ApiResponse::ok_description("Your custom code is available as of now"),
            Ok(false) => ApiResponse::err("Your custom code already exist"),
            Err(e) => ApiResponse::err(e.to_string()),
        },
        (None, None) => ApiResponse::err("Please fill out url parameter"),
        (Some(url), None) => match state.registry.allocate_auto(url, None).await {
            Ok(link) => ApiResponse::ok_url(state.short_url(&link.active_code)),
            Err(e) => ApiResponse::err(e.to_string()),
        },
        (Some(url), Some(custom)) => {
            match state.registry.allocate_custom(url, custom, None).await {
                Ok(link) => ApiResponse::ok_url(state.short_url(&link.active_code)),
                Err(e) => ApiResponse::err(e.to_string()),
            }
        }
    };

    Json(response)
}
