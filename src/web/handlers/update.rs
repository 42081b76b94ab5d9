//! Link rename handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::AuthUser;

/// Template for the rename form.
#[derive(Template, WebTemplate)]
#[template(path = "update.html")]
struct UpdateTemplate {
    short_url: String,
    destination_url: String,
    active_code: String,
    auto_code: String,
}

/// Query parameters for `GET /update`.
#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub id: i64,
}

/// Form body for `POST /update`.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameForm {
    /// The desired new active code.
    #[validate(length(min = 1, message = "please fill out ALL required fields"))]
    pub new: String,
    /// The link's current active code.
    #[validate(length(min = 1, message = "please fill out ALL required fields"))]
    pub code: String,
}

/// Fetches a link for editing.
///
/// # Endpoint
///
/// `GET /update?id={link_id}` (session required)
///
/// # Errors
///
/// Returns 404 for an unknown id and 403 when the requester does not own the
/// link.
pub async fn edit_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<EditQuery>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.registry.get_owned(query.id, Some(user.0)).await?;

    Ok(UpdateTemplate {
        short_url: state.short_url(&link.active_code),
        destination_url: link.destination_url,
        active_code: link.active_code,
        auto_code: link.auto_code,
    })
}

/// Renames a link's active code.
///
/// # Endpoint
///
/// `POST /update` with form fields `new` and `code` (session required)
///
/// The link is addressed by its current active code. Renaming to the link's
/// own auto or active code succeeds as a no-op.
///
/// # Errors
///
/// Returns 404 for an unknown current code, 403 for a non-owner, 400 for a
/// non-alphanumeric new code, and 409 if the new code is taken.
pub async fn rename_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<RenameForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let link = state.registry.get_by_active_code(&form.code).await?;

    state.registry.rename(link.id, Some(user.0), &form.new).await?;

    Ok(Redirect::to("/dashboard"))
}
