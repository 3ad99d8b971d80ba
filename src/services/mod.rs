pub mod order_service;
pub mod pricing;
pub mod product_service;
