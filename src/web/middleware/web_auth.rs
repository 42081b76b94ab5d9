//! Session-cookie authentication for the HTML pages.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    http::header::COOKIE,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;

/// The authenticated account id, inserted into request extensions by
/// [`layer`] for protected handlers to consume.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

/// Extracts and verifies the `session` cookie, if present.
///
/// The cookie value is an HMAC-signed account id issued at login; a bad
/// signature is treated the same as no cookie.
pub fn session_account(headers: &HeaderMap, state: &AppState) -> Option<i64> {
    let token = headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some("session"), Some(value)) => Some(value.to_string()),
                    _ => None,
                }
            })
        })?;

    state.accounts.verify_session(&token)
}

/// Middleware guarding session-only routes.
///
/// On a valid session, inserts [`AuthUser`] and continues; otherwise
/// redirects to the login page (a browser context wants a login form, not a
/// 401 body).
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    match session_account(req.headers(), &st) {
        Some(account_id) => {
            req.extensions_mut().insert(AuthUser(account_id));
            Ok(next.run(req).await)
        }
        None => Err(Redirect::to("/login")),
    }
}
