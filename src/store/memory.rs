use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    models::{NewOrder, NewProduct, Order, Product},
    store::{DocumentStore, StoreError, StoreResult},
};

#[derive(Default)]
struct Collections {
    // insertion order doubles as creation order
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// In-process store for tests and database-less runs.
///
/// A single mutex guards both collections, so an order insert and its stock
/// decrements are applied together or not at all.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
    unavailable: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_product(&self, product: NewProduct) -> StoreResult<Uuid> {
        self.check_available()?;
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.collections.lock().products.push(Product {
            id,
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            image: product.image,
            in_stock: product.in_stock,
            stock_qty: product.stock_qty,
            created_at: now,
            updated_at: now,
        });
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let collections = self.collections.lock();
        Ok(collections.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self, limit: u64) -> StoreResult<Vec<Product>> {
        let collections = self.collections.lock();
        Ok(collections
            .products
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_products(&self) -> StoreResult<u64> {
        Ok(self.collections.lock().products.len() as u64)
    }

    async fn insert_order(&self, order: NewOrder) -> StoreResult<Uuid> {
        self.check_available()?;
        let mut collections = self.collections.lock();

        // check every line before touching anything
        let mut claimed: Vec<(usize, i32)> = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let position = collections
                .products
                .iter()
                .position(|p| p.id == item.product_id);
            let Some(position) = position else {
                return Err(StoreError::StockConflict {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            };
            let already: i32 = claimed
                .iter()
                .filter(|(p, _)| *p == position)
                .map(|(_, q)| q)
                .sum();
            if collections.products[position].stock_qty - already < item.quantity {
                return Err(StoreError::StockConflict {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
            claimed.push((position, item.quantity));
        }

        let now = Utc::now();
        for (position, quantity) in claimed {
            let product = &mut collections.products[position];
            product.stock_qty -= quantity;
            product.updated_at = now;
        }

        let id = Uuid::new_v4();
        collections.orders.push(Order {
            id,
            customer_name: order.customer.customer_name,
            customer_email: order.customer.customer_email,
            customer_address: order.customer.customer_address,
            items: order.items,
            subtotal: order.subtotal,
            shipping: order.shipping,
            total: order.total,
            status: order.status,
            created_at: now,
            updated_at: now,
        });
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let collections = self.collections.lock();
        Ok(collections.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_orders(&self, limit: u64) -> StoreResult<Vec<Order>> {
        let collections = self.collections.lock();
        Ok(collections
            .orders
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }
}
