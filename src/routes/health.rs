use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{response::ApiResponse, state::AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running")),
    tag = "Health"
)]
pub async fn root() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Ecommerce backend is running"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let database = match state.store.ping().await {
        Ok(()) => "connected".to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "store ping failed");
            "unavailable".to_string()
        }
    };
    let data = HealthData {
        status: "ok".to_string(),
        database,
    };

    Json(ApiResponse::success("Health check", data))
}
