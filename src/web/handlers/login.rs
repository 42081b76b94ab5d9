//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;

/// Template for the login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {}

/// Form body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "please fill out all required fields"))]
    pub email: String,
    #[validate(length(min = 1, message = "please fill out all required fields"))]
    pub password: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {}
}

/// Authenticates and starts a session.
///
/// # Endpoint
///
/// `POST /login` with form fields `email`, `password`
///
/// On success, sets an HttpOnly `session` cookie holding the signed account
/// id and redirects to the dashboard.
///
/// # Errors
///
/// Returns 401 on bad credentials.
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;

    let account = state.accounts.login(&form.email, &form.password).await?;

    let token = state.accounts.session_token(account.id);
    let cookie = format!("session={token}; Path=/; HttpOnly; SameSite=Lax");

    Ok(([(SET_COOKIE, cookie)], Redirect::to("/dashboard")))
}

/// Ends the session.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler() -> impl IntoResponse {
    let cookie = "session=; Path=/; HttpOnly; Max-Age=0".to_string();

    ([(SET_COOKIE, cookie)], Redirect::to("/login"))
}
