//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /url/{code}`
///
/// # Click Tracking
///
/// The registry enqueues exactly one click event per successful resolution;
/// the background worker applies the atomic increment. Counting never delays
/// the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if no link has `code` as its active code.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.registry.resolve(&code).await?;

    Ok(Redirect::temporary(&link.destination_url))
}
