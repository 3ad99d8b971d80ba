use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList, SeedReport},
    error::{AppError, AppResult},
    models::{NewProduct, Product},
    state::AppState,
    store::{Collection, StoreError},
};

/// Parse a client-supplied identifier. Anything that is not a UUID is a
/// client error, distinct from a well-formed id that matches nothing.
pub fn parse_id(collection: Collection, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidIdentifier {
        collection,
        id: raw.to_string(),
    })
}

pub async fn find_product(state: &AppState, id: &str) -> AppResult<Product> {
    let product_id = parse_id(Collection::Product, id)?;
    match state.store.find_product(product_id).await? {
        Some(product) => Ok(product),
        None => Err(AppError::ProductNotFound { id: id.to_string() }),
    }
}

pub async fn list_products(state: &AppState, limit: u64) -> AppResult<ProductList> {
    let items = state.store.list_products(limit).await?;
    Ok(ProductList { items })
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let new_product = payload.into_new_product()?;
    let id = state.store.insert_product(new_product).await?;
    tracing::info!(product_id = %id, "product created");

    state
        .store
        .find_product(id)
        .await?
        .ok_or(AppError::Persistence(StoreError::Missing {
            collection: Collection::Product,
            id,
        }))
}

/// Fill an empty catalog with the sample products. A catalog that already
/// has products is left alone.
pub async fn seed_catalog(state: &AppState) -> AppResult<SeedReport> {
    let existing = state.store.count_products().await?;
    if existing > 0 {
        return Ok(SeedReport {
            message: "Products already exist".into(),
            count: existing,
        });
    }

    let samples = sample_products();
    let count = samples.len() as u64;
    for product in samples {
        state.store.insert_product(product).await?;
    }
    tracing::info!(count, "seeded products");

    Ok(SeedReport {
        message: "Seeded products".into(),
        count,
    })
}

pub fn sample_products() -> Vec<NewProduct> {
    let sample = |title: &str, description: &str, cents: i64, category: &str, image: &str, stock_qty: i32| {
        NewProduct {
            title: title.into(),
            description: Some(description.into()),
            price: Decimal::new(cents, 2),
            category: category.into(),
            image: Some(image.into()),
            in_stock: true,
            stock_qty,
        }
    };

    vec![
        sample(
            "Classic Tee",
            "Soft cotton t-shirt",
            1999,
            "Apparel",
            "https://images.unsplash.com/photo-1520975916090-3105956dac38?q=80&w=1200&auto=format&fit=crop",
            100,
        ),
        sample(
            "Denim Jacket",
            "All-season denim jacket",
            5900,
            "Apparel",
            "https://images.unsplash.com/photo-1548883354-7622d03aca27?q=80&w=1200&auto=format&fit=crop",
            40,
        ),
        sample(
            "Sneakers",
            "Comfortable everyday sneakers",
            7950,
            "Footwear",
            "https://images.unsplash.com/photo-1525966222134-fcfa99b8ae77?q=80&w=1200&auto=format&fit=crop",
            60,
        ),
        sample(
            "Backpack",
            "Durable travel backpack",
            4500,
            "Accessories",
            "https://images.unsplash.com/photo-1504280390368-3971f6602f25?q=80&w=1200&auto=format&fit=crop",
            80,
        ),
    ]
}
