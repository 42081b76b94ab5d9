//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET|POST /`        - Home page / shorten form (public)
//! - `GET /url/{code}`   - Short link redirect (public)
//! - `GET /api`          - Programmatic endpoint (public)
//! - `GET|POST /register`, `GET|POST /login`, `GET /logout` - Account lifecycle
//! - `GET /dashboard`    - Link list (session required)
//! - `GET|POST /update`  - Link rename (session required)
//! - `GET /health`       - DB connectivity check (public)
//! - `/static/*`         - Static assets

use crate::api::handlers::{api_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, edit_link_handler, index_page, login_handler, login_page, logout_handler,
    register_handler, register_page, rename_handler, shorten_handler,
};
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected = Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/update", get(edit_link_handler).post(rename_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        ));

    let public = Router::new()
        .route("/", get(index_page).post(shorten_handler))
        .route("/url/{code}", get(redirect_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/login", get(login_page).post(login_handler))
        .route("/logout", get(logout_handler))
        .route("/api", get(api_handler))
        .route("/health", get(health_handler));

    let router = Router::new()
        .merge(protected)
        .merge(public)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
