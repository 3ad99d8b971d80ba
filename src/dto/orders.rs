use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{Customer, Order, OrderItem},
    validation::{ValidationErrors, is_valid_email},
};

/// A requested line. Only the product reference and quantity are read;
/// any title or price the client sends alongside is ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub shipping: Decimal,
}

impl CreateOrderRequest {
    /// Field-level checks only. Whether the item list is empty or the
    /// products exist is decided by pricing.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("customer_name", &self.customer_name);
        if !is_valid_email(self.customer_email.trim()) {
            errors.add("customer_email", "must be a valid email address");
        }
        errors.require_text("customer_address", &self.customer_address);
        errors.require_amount("shipping", self.shipping);
        for (index, item) in self.items.iter().enumerate() {
            if item.quantity < 1 {
                errors.add(format!("items[{index}].quantity"), "must be at least 1");
            }
        }
        errors.into_result()
    }

    pub fn customer(&self) -> Customer {
        Customer {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            customer_address: self.customer_address.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderQuote {
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
