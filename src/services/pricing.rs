//! Server-side validation and pricing of requested order lines.
//!
//! Nothing here writes to the store: the result can be committed as an
//! order or returned as a quote.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    dto::orders::CreateOrderRequest,
    error::{AppError, AppResult},
    models::OrderItem,
    services::product_service,
    state::AppState,
    validation::ValidationErrors,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Round to cents, midpoint to even.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Subtotal is the exact sum of the line totals, rounded once at the end.
/// Amounts too large for a `Decimal` are rejected as a validation error.
pub fn price_lines(items: Vec<OrderItem>, shipping: Decimal) -> AppResult<PricedOrder> {
    let mut exact = Decimal::ZERO;
    for (index, item) in items.iter().enumerate() {
        exact = item
            .line_total()
            .and_then(|line| exact.checked_add(line))
            .ok_or_else(|| out_of_range(format!("items[{index}].quantity"), "order total out of range"))?;
    }
    let subtotal = round_money(exact);
    let shipping = round_money(shipping);
    let total = subtotal
        .checked_add(shipping)
        .map(round_money)
        .ok_or_else(|| out_of_range("shipping".into(), "order total out of range"))?;

    Ok(PricedOrder {
        items,
        subtotal,
        shipping,
        total,
    })
}

fn out_of_range(field: String, message: &str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, message);
    AppError::Validation(errors)
}

/// Check every requested line against the live catalog and price the order
/// from current product records. Lines are processed in request order and the
/// first failure aborts the whole request.
pub async fn validate_and_price(
    state: &AppState,
    request: &CreateOrderRequest,
) -> AppResult<PricedOrder> {
    if request.items.is_empty() {
        return Err(AppError::EmptyOrder);
    }

    // the same product may appear on several lines
    let mut demand: HashMap<Uuid, i32> = HashMap::new();
    let mut items = Vec::with_capacity(request.items.len());

    for line in &request.items {
        let product = product_service::find_product(state, &line.product_id).await?;

        let wanted = demand.entry(product.id).or_insert(0);
        *wanted = wanted.saturating_add(line.quantity);
        if !product.in_stock || product.stock_qty < *wanted {
            tracing::warn!(
                product_id = %product.id,
                stock_qty = product.stock_qty,
                requested = *wanted,
                "insufficient stock"
            );
            return Err(AppError::InsufficientStock {
                title: product.title,
            });
        }

        items.push(OrderItem {
            product_id: product.id,
            title: product.title,
            price: product.price,
            quantity: line.quantity,
            image: product.image,
        });
    }

    price_lines(items, request.shipping)
}
