use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

/// Write side of the store. Every call is committed before it returns.
/// `None` means no row carried the requested id and nothing was changed.
#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError>;
    async fn delete_product(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
}
