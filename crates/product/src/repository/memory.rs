use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{
    collections::BTreeMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::info;

#[derive(Debug)]
struct MemoryState {
    next_id: i32,
    products: BTreeMap<i32, ProductModel>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            products: BTreeMap::new(),
        }
    }
}

/// Process-local product store used when no database is configured.
///
/// Ids are handed out from a counter starting at 1 and are never reused,
/// mirroring a `SERIAL` column. Listing is ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Custom("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Custom("lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let state = self.read()?;
        Ok(state.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let state = self.read()?;
        Ok(state.products.get(&id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut state = self.write()?;

        let product_id = state.next_id;
        state.next_id = product_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Custom("product id space exhausted".to_string()))?;

        let product = ProductModel {
            product_id,
            name: req.name.clone(),
            price: req.price,
        };
        state.products.insert(product_id, product.clone());

        info!("✅ Created product ID {} ({})", product_id, product.name);
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut state = self.write()?;

        Ok(state.products.get_mut(&id).map(|product| {
            product.name = req.name.clone();
            product.price = req.price;
            product.clone()
        }))
    }

    async fn delete_product(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let mut state = self.write()?;
        Ok(state.products.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, price: f64) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_never_reused() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create_product(&create("Widget", 9.99)).await.unwrap();
        let second = repo.create_product(&create("Gadget", 12.5)).await.unwrap();
        assert_eq!(first.product_id, 1);
        assert_eq!(second.product_id, 2);

        repo.delete_product(second.product_id).await.unwrap();
        let third = repo.create_product(&create("Gizmo", 1.0)).await.unwrap();
        assert_eq!(third.product_id, 3);
    }

    #[tokio::test]
    async fn update_of_missing_id_leaves_store_untouched() {
        let repo = InMemoryProductRepository::new();
        let existing = repo.create_product(&create("Widget", 9.99)).await.unwrap();

        let req = UpdateProductRequest {
            name: "Gadget".to_string(),
            price: 12.5,
        };
        let result = repo.update_product(99, &req).await.unwrap();

        assert!(result.is_none());
        assert_eq!(repo.find_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn update_overwrites_name_and_price_only() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create_product(&create("Widget", 9.99)).await.unwrap();

        let req = UpdateProductRequest {
            name: "Gadget".to_string(),
            price: 12.5,
        };
        let updated = repo
            .update_product(created.product_id, &req)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.product_id, created.product_id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.price, 12.5);
        assert_eq!(
            repo.find_by_id(created.product_id).await.unwrap(),
            Some(updated)
        );
    }

    #[tokio::test]
    async fn delete_removes_row_and_reports_absence() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create_product(&create("Widget", 9.99)).await.unwrap();

        assert_eq!(
            repo.delete_product(created.product_id).await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(repo.delete_product(created.product_id).await.unwrap(), None);
        assert!(repo.find_by_id(created.product_id).await.unwrap().is_none());
    }
}
