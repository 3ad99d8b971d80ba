//! Access to the two document collections the service persists.
//!
//! Every operation is a single call against one collection, except
//! [`DocumentStore::insert_order`], which writes the order and adjusts stock
//! for each of its lines as one atomic unit.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewOrder, NewProduct, Order, Product};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Product,
    Order,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Product => "product",
            Collection::Order => "order",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("malformed {collection} document {id}: {reason}")]
    Corrupt {
        collection: Collection,
        id: Uuid,
        reason: String,
    },

    /// The conditional stock decrement matched nothing: the product is gone
    /// or no longer has enough units.
    #[error("stock for product {product_id} could not cover quantity {quantity}")]
    StockConflict { product_id: Uuid, quantity: i32 },

    /// A document that was just written could not be read back.
    #[error("{collection} document {id} missing after write")]
    Missing { collection: Collection, id: Uuid },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn insert_product(&self, product: NewProduct) -> StoreResult<Uuid>;

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>>;

    /// Oldest first.
    async fn list_products(&self, limit: u64) -> StoreResult<Vec<Product>>;

    async fn count_products(&self) -> StoreResult<u64>;

    /// Persist the order and decrement stock for each line, only where the
    /// product still holds at least the ordered quantity. Nothing is written
    /// unless every line succeeds.
    async fn insert_order(&self, order: NewOrder) -> StoreResult<Uuid>;

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>>;

    /// Newest first.
    async fn list_orders(&self, limit: u64) -> StoreResult<Vec<Order>>;

    async fn ping(&self) -> StoreResult<()>;
}
