use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderList, OrderQuote},
    error::{AppError, AppResult},
    models::{Customer, NewOrder, Order, OrderStatus},
    services::{
        pricing::{self, PricedOrder},
        product_service::parse_id,
    },
    state::AppState,
    store::{Collection, StoreError},
};

pub async fn place_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<Order> {
    payload.validate()?;
    let priced = pricing::validate_and_price(state, &payload).await?;
    commit(state, payload.customer(), priced).await
}

/// Price an order without writing anything.
pub async fn quote_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<OrderQuote> {
    payload.validate()?;
    let priced = pricing::validate_and_price(state, &payload).await?;
    Ok(OrderQuote {
        items: priced.items,
        subtotal: priced.subtotal,
        shipping: priced.shipping,
        total: priced.total,
    })
}

/// Persist a priced order and take its quantities out of stock.
///
/// The store applies the order insert and every stock decrement atomically.
/// A decrement that would drive stock below zero (another order got there
/// first) rolls everything back and is reported as insufficient stock.
pub async fn commit(state: &AppState, customer: Customer, priced: PricedOrder) -> AppResult<Order> {
    let new_order = NewOrder {
        customer,
        items: priced.items,
        subtotal: priced.subtotal,
        shipping: priced.shipping,
        total: priced.total,
        status: OrderStatus::Processing,
    };
    let titles: Vec<(Uuid, String)> = new_order
        .items
        .iter()
        .map(|item| (item.product_id, item.title.clone()))
        .collect();

    let id = match state.store.insert_order(new_order).await {
        Ok(id) => id,
        Err(StoreError::StockConflict { product_id, quantity }) => {
            tracing::warn!(%product_id, quantity, "stock changed before commit");
            let title = titles
                .into_iter()
                .find(|(id, _)| *id == product_id)
                .map(|(_, title)| title)
                .unwrap_or_else(|| product_id.to_string());
            return Err(AppError::InsufficientStock { title });
        }
        Err(err) => return Err(err.into()),
    };

    let order = state
        .store
        .find_order(id)
        .await?
        .ok_or(AppError::Persistence(StoreError::Missing {
            collection: Collection::Order,
            id,
        }))?;

    tracing::info!(
        order_id = %order.id,
        lines = order.items.len(),
        total = %order.total,
        "order placed"
    );
    Ok(order)
}

pub async fn list_orders(state: &AppState, limit: u64) -> AppResult<OrderList> {
    let items = state.store.list_orders(limit).await?;
    Ok(OrderList { items })
}

pub async fn get_order(state: &AppState, id: &str) -> AppResult<Order> {
    let order_id = parse_id(Collection::Order, id)?;
    match state.store.find_order(order_id).await? {
        Some(order) => Ok(order),
        None => Err(AppError::OrderNotFound { id: id.to_string() }),
    }
}
