use crate::model::product::Product as ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = 9.99)]
    pub price: f64,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            price: value.price,
        }
    }
}
