#![allow(dead_code)]

use rust_decimal::Decimal;
use storefront_api::{
    dto::orders::{CreateOrderRequest, OrderItemRequest},
    models::{NewProduct, Product},
    state::AppState,
    store::{DocumentStore, MemoryStore},
};

pub fn money(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

pub fn memory_state() -> (MemoryStore, AppState) {
    let store = MemoryStore::new();
    let state = AppState::new(store.clone());
    (store, state)
}

pub fn classic_tee(stock_qty: i32, in_stock: bool) -> NewProduct {
    NewProduct {
        title: "Classic Tee".into(),
        description: Some("Soft cotton t-shirt".into()),
        price: money("19.99"),
        category: "Apparel".into(),
        image: Some("https://images.example.com/classic-tee.jpg".into()),
        in_stock,
        stock_qty,
    }
}

pub async fn insert_product(store: &MemoryStore, product: NewProduct) -> Product {
    let id = store.insert_product(product).await.expect("insert product");
    store
        .find_product(id)
        .await
        .expect("find product")
        .expect("product exists")
}

pub fn order_request(items: Vec<(String, i32)>, shipping: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: "Ada Lovelace".into(),
        customer_email: "ada@example.com".into(),
        customer_address: "12 Analytical Way, London".into(),
        items: items
            .into_iter()
            .map(|(product_id, quantity)| OrderItemRequest {
                product_id,
                quantity,
            })
            .collect(),
        shipping: money(shipping),
    }
}
