use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{error::ErrorData, response::ApiResponse, state::AppState};

pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}

/// Every route the service answers, without middleware or state.
pub fn create_app_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<ErrorData>>) {
    let body = ApiResponse {
        message: "Not Found".into(),
        data: Some(ErrorData {
            kind: "route_not_found".into(),
            error: format!("No route for {}", uri.path()),
            violations: Vec::new(),
        }),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
