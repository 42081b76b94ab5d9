mod common;

use axum::Router;
use axum::http::{StatusCode, header::LOCATION};
use axum::routing::get;
use axum_test::TestServer;
use sqlx::PgPool;

use linklet::api::handlers::redirect_handler;
use linklet::domain::click_event::ClickEvent;
use linklet::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/url/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_known_code(pool: PgPool) {
    let (state, mut click_rx) = common::create_test_state(pool.clone());
    let id = common::create_test_link(&pool, "abc1234", "https://example.com/page", None).await;
    let server = server(state);

    let response = server.get("/url/abc1234").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "https://example.com/page"
    );

    // Exactly one click event per resolution.
    assert_eq!(click_rx.try_recv().unwrap(), ClickEvent { link_id: id });
    assert!(click_rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_redirect_unknown_code(pool: PgPool) {
    let (state, mut click_rx) = common::create_test_state(pool);
    let server = server(state);

    let response = server.get("/url/missing").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(click_rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_redirect_retired_auto_code(pool: PgPool) {
    let (state, _click_rx) = common::create_test_state(pool.clone());
    let owner = common::create_test_account(&pool, "owner@example.com").await;
    let id = common::create_test_link(&pool, "before1", "https://example.com", Some(owner)).await;
    state.registry.rename(id, Some(owner), "after1").await.unwrap();
    let server = server(state);

    // Only the active code resolves; the retired auto code does not.
    let response = server.get("/url/after1").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);

    let response = server.get("/url/before1").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
