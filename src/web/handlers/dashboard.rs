//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    response::IntoResponse,
};

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::AuthUser;

/// Template for the dashboard listing the account's links.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    links: Vec<Link>,
    base_url: String,
}

/// Lists the logged-in account's links, newest first.
///
/// # Endpoint
///
/// `GET /dashboard` (session required)
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let links = state.registry.list_for_owner(user.0).await?;

    Ok(DashboardTemplate {
        links,
        base_url: state.base_url.clone(),
    })
}
