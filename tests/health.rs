use axum::extract::State;
use storefront_api::{routes::health::{health_check, root}, state::AppState, store::MemoryStore};

#[tokio::test]
async fn health_check_returns_ok() {
    let state = AppState::new(MemoryStore::new());
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "connected");
}

#[tokio::test]
async fn health_check_reports_unreachable_store() {
    let store = MemoryStore::new();
    store.set_unavailable(true);
    let response = health_check(State(AppState::new(store))).await;

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "unavailable");
}

#[tokio::test]
async fn root_reports_liveness() {
    let response = root().await;
    assert_eq!(response.0.message, "Ecommerce backend is running");
    assert!(response.0.data.is_none());
}
