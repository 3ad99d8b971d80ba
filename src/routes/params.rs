use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PRODUCT_LIMIT: u64 = 100;
pub const DEFAULT_ORDER_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 1000;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Maximum number of documents to return.
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn normalize(&self, default: u64) -> u64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }
}
