use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Payloads carry no `id`; a client-supplied one is dropped by serde.

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Widget")]
    pub name: String,

    #[schema(example = 9.99)]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Gadget")]
    pub name: String,

    #[schema(example = 12.5)]
    pub price: f64,
}
