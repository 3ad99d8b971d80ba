use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderList, OrderQuote},
    error::{AppResult, ErrorData},
    extract::ValidJson,
    models::Order,
    response::ApiResponse,
    routes::params::{DEFAULT_ORDER_LIMIT, ListQuery},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/quote", post(quote_order))
        .route("/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(ListQuery),
    responses(
        (status = 200, description = "List orders, newest first", body = OrderList)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrderList>> {
    let limit = query.normalize(DEFAULT_ORDER_LIMIT);
    let orders = order_service::list_orders(&state, limit).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = Order),
        (status = 400, description = "Empty order, malformed product id or insufficient stock", body = ApiResponse<ErrorData>),
        (status = 404, description = "Unknown product", body = ApiResponse<ErrorData>),
        (status = 422, description = "Invalid customer or line fields", body = ApiResponse<ErrorData>),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = order_service::place_order(&state, payload).await?;
    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/api/orders/quote",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Priced order, nothing persisted", body = OrderQuote),
        (status = 400, description = "Empty order, malformed product id or insufficient stock", body = ApiResponse<ErrorData>),
        (status = 404, description = "Unknown product", body = ApiResponse<ErrorData>),
        (status = 422, description = "Invalid customer or line fields", body = ApiResponse<ErrorData>),
    ),
    tag = "Orders"
)]
pub async fn quote_order(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateOrderRequest>,
) -> AppResult<Json<OrderQuote>> {
    let quote = order_service::quote_order(&state, payload).await?;
    Ok(Json(quote))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Get order", body = Order),
        (status = 400, description = "Malformed order id", body = ApiResponse<ErrorData>),
        (status = 404, description = "Order not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = order_service::get_order(&state, &id).await?;
    Ok(Json(order))
}
