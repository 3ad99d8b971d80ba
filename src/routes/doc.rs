use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{CreateOrderRequest, OrderItemRequest, OrderList, OrderQuote},
        products::{CreateProductRequest, ProductList},
    },
    error::ErrorData,
    models::{Order, OrderItem, OrderStatus, Product},
    response::ApiResponse,
    routes::{health, orders, products},
    validation::FieldViolation,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        orders::list_orders,
        orders::create_order,
        orders::quote_order,
        orders::get_order,
    ),
    components(
        schemas(
            Product,
            Order,
            OrderItem,
            OrderStatus,
            CreateProductRequest,
            CreateOrderRequest,
            OrderItemRequest,
            OrderQuote,
            ProductList,
            OrderList,
            ErrorData,
            FieldViolation,
            health::HealthData,
            ApiResponse<ErrorData>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Orders", description = "Order placement endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
