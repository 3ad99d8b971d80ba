use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    models::{NewOrder, NewProduct, Order, OrderItem, Product, UnknownOrderStatus},
    store::{Collection, DocumentStore, StoreError, StoreResult},
};

/// Postgres-backed store. Each collection is a table; order lines live in a
/// JSONB column on the order row.
#[derive(Clone)]
pub struct PgStore {
    orm: OrmConn,
}

impl PgStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_product(&self, product: NewProduct) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        ProductActive {
            id: Set(id),
            title: Set(product.title),
            description: Set(product.description),
            price: Set(product.price),
            category: Set(product.category),
            image: Set(product.image),
            in_stock: Set(product.in_stock),
            stock_qty: Set(product.stock_qty),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&self.orm)
        .await?;
        Ok(id)
    }

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let product = Products::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(product_from_entity);
        Ok(product)
    }

    async fn list_products(&self, limit: u64) -> StoreResult<Vec<Product>> {
        let products = Products::find()
            .order_by_asc(ProdCol::CreatedAt)
            .limit(limit)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn count_products(&self) -> StoreResult<u64> {
        Ok(Products::find().count(&self.orm).await?)
    }

    async fn insert_order(&self, order: NewOrder) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let items = serde_json::to_value(&order.items).map_err(|err| StoreError::Corrupt {
            collection: Collection::Order,
            id,
            reason: err.to_string(),
        })?;

        let txn = self.orm.begin().await?;

        OrderActive {
            id: Set(id),
            customer_name: Set(order.customer.customer_name),
            customer_email: Set(order.customer.customer_email),
            customer_address: Set(order.customer.customer_address),
            items: Set(items),
            subtotal: Set(order.subtotal),
            shipping: Set(order.shipping),
            total: Set(order.total),
            status: Set(order.status.as_str().to_string()),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?;

        let now = Utc::now();
        for item in &order.items {
            // decrement only while enough stock remains
            let result = Products::update_many()
                .col_expr(ProdCol::StockQty, Expr::col(ProdCol::StockQty).sub(item.quantity))
                .col_expr(ProdCol::UpdatedAt, Expr::value(now))
                .filter(ProdCol::Id.eq(item.product_id))
                .filter(ProdCol::StockQty.gte(item.quantity))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Err(StoreError::StockConflict {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
        }

        txn.commit().await?;
        Ok(id)
    }

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Orders::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(order_from_entity)
            .transpose()
    }

    async fn list_orders(&self, limit: u64) -> StoreResult<Vec<Order>> {
        Orders::find()
            .order_by_desc(OrderCol::CreatedAt)
            .limit(limit)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(order_from_entity)
            .collect()
    }

    async fn ping(&self) -> StoreResult<()> {
        let backend = self.orm.get_database_backend();
        self.orm
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await?;
        Ok(())
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        title: model.title,
        description: model.description,
        price: model.price,
        category: model.category,
        image: model.image,
        in_stock: model.in_stock,
        stock_qty: model.stock_qty,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn order_from_entity(model: OrderModel) -> StoreResult<Order> {
    let id = model.id;
    let corrupt = move |reason: String| StoreError::Corrupt {
        collection: Collection::Order,
        id,
        reason,
    };
    let items: Vec<OrderItem> =
        serde_json::from_value(model.items).map_err(|err| corrupt(err.to_string()))?;
    let status = model
        .status
        .parse()
        .map_err(|err: UnknownOrderStatus| corrupt(err.to_string()))?;

    Ok(Order {
        id,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_address: model.customer_address,
        items,
        subtotal: model.subtotal,
        shipping: model.shipping,
        total: model.total,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
