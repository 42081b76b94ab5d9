//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AccountService, RegistryService};
use crate::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};

/// Application state: the two services, the pool (for health checks), and the
/// public base URL.
///
/// Cloned per request by Axum; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub registry: Arc<RegistryService<PgLinkRepository>>,
    pub accounts: Arc<AccountService<PgAccountRepository>>,
    /// Prefix for short URLs shown to users, e.g. `https://lnk.example/url/`.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        db: Arc<PgPool>,
        registry: Arc<RegistryService<PgLinkRepository>>,
        accounts: Arc<AccountService<PgAccountRepository>>,
        base_url: String,
    ) -> Self {
        Self {
            db,
            registry,
            accounts,
            base_url,
        }
    }

    /// Builds the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}", self.base_url, code)
    }
}
