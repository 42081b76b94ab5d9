#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use linklet::application::services::{AccountService, RegistryService};
use linklet::domain::click_event::ClickEvent;
use linklet::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};
use linklet::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "http://short.test/url/";

/// Builds an [`AppState`] over the test pool, returning the receiving end of
/// the click channel so tests can observe enqueued click events.
pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let pool = Arc::new(pool);
    let (click_tx, click_rx) = mpsc::channel(100);

    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let account_repository = Arc::new(PgAccountRepository::new(pool.clone()));

    let registry = Arc::new(RegistryService::new(link_repository, click_tx));
    let accounts = Arc::new(AccountService::new(
        account_repository,
        TEST_SECRET.to_string(),
    ));

    (
        AppState::new(pool, registry, accounts, BASE_URL.to_string()),
        click_rx,
    )
}

pub async fn create_test_account(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO accounts (email, password_hash) VALUES ($1, 'x$y') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str, owner_id: Option<i64>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO links (destination_url, auto_code, active_code, owner_id)
        VALUES ($1, $2, $2, $3)
        RETURNING id
        "#,
    )
    .bind(url)
    .bind(code)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Fetches `(auto_code, active_code, click_count)` for a link.
pub async fn get_link_codes(pool: &PgPool, id: i64) -> (String, String, i64) {
    sqlx::query_as::<_, (String, String, i64)>(
        "SELECT auto_code, active_code, click_count FROM links WHERE id = $1",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Builds the `Cookie` header value for an authenticated session.
pub fn session_cookie(state: &AppState, account_id: i64) -> String {
    format!("session={}", state.accounts.session_token(account_id))
}
