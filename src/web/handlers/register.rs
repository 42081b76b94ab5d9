//! Registration page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;

/// Template for the registration page.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {}

/// Form body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "please fill out all fields"))]
    pub password: String,
    #[validate(length(min = 1, message = "please fill out all fields"))]
    pub confirmation: String,
}

/// Renders the registration page.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {}
}

/// Creates a new account.
///
/// # Endpoint
///
/// `POST /register` with form fields `email`, `password`, `confirmation`
///
/// # Errors
///
/// Returns 400 if fields are missing or the confirmation does not match, and
/// 409 if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    if form.password != form.confirmation {
        return Err(AppError::bad_request(
            "password confirmation doesn't match password",
            json!({}),
        ));
    }

    state.accounts.register(form.email, form.password).await?;

    Ok(Redirect::to("/login"))
}
