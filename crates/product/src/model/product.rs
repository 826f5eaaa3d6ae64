use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub price: f64,
}
