//! Home page and shorten form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::session_account;

/// Template for the home page with the shorten form.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {}

/// Template shown to anonymous users after shortening.
#[derive(Template, WebTemplate)]
#[template(path = "success.html")]
struct SuccessTemplate {
    short_url: String,
    destination_url: String,
}

/// Template shown to logged-in users after shortening.
#[derive(Template, WebTemplate)]
#[template(path = "confirm.html")]
struct ConfirmTemplate {
    short_url: String,
    destination_url: String,
    code: String,
}

/// Form body for `POST /`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[validate(length(min = 1, message = "please fill out all required fields"))]
    pub url: String,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_page() -> impl IntoResponse {
    IndexTemplate {}
}

/// Shortens a URL submitted from the home page form.
///
/// # Endpoint
///
/// `POST /` with form field `url`
///
/// When a valid session cookie is present the link is owned by that account
/// (and shows up on the dashboard); otherwise it is anonymous.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<Response, AppError> {
    form.validate()?;

    let owner_id = session_account(&headers, &state);

    let link = state.registry.allocate_auto(form.url, owner_id).await?;
    let short_url = state.short_url(&link.active_code);

    if owner_id.is_some() {
        Ok(ConfirmTemplate {
            short_url,
            destination_url: link.destination_url,
            code: link.active_code,
        }
        .into_response())
    } else {
        Ok(SuccessTemplate {
            short_url,
            destination_url: link.destination_url,
        }
        .into_response())
    }
}
