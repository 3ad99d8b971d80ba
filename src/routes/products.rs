use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::products::{CreateProductRequest, ProductList},
    error::{AppResult, ErrorData},
    extract::ValidJson,
    models::Product,
    response::ApiResponse,
    routes::params::{DEFAULT_PRODUCT_LIMIT, ListQuery},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ListQuery),
    responses(
        (status = 200, description = "List products, oldest first", body = ProductList)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProductList>> {
    let limit = query.normalize(DEFAULT_PRODUCT_LIMIT);
    let products = product_service::list_products(&state, limit).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 400, description = "Malformed product id", body = ApiResponse<ErrorData>),
        (status = 404, description = "Product not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = product_service::find_product(&state, &id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = Product),
        (status = 422, description = "Invalid product fields", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateProductRequest>,
) -> AppResult<Json<Product>> {
    let product = product_service::create_product(&state, payload).await?;
    Ok(Json(product))
}
