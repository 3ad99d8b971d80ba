use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{NewProduct, Product},
    validation::{ValidationErrors, is_http_url},
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default = "default_stock_qty")]
    pub stock_qty: i32,
}

fn default_in_stock() -> bool {
    true
}

fn default_stock_qty() -> i32 {
    50
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        errors.require_text("category", &self.category);
        errors.require_amount("price", self.price);
        if self.stock_qty < 0 {
            errors.add("stock_qty", "must be greater than or equal to 0");
        }
        if let Some(image) = &self.image {
            if !is_http_url(image) {
                errors.add("image", "must be an http(s) URL");
            }
        }
        errors.into_result()
    }

    pub fn into_new_product(self) -> Result<NewProduct, ValidationErrors> {
        self.validate()?;
        Ok(NewProduct {
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            in_stock: self.in_stock,
            stock_qty: self.stock_qty,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedReport {
    pub message: String,
    pub count: u64,
}
