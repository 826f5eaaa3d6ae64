use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING product_id, name, price
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            result.product_id, result.name
        );
        Ok(result)
    }

    async fn update_product(
        &self,
        id: i32,
        product: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                price = $3
            WHERE product_id = $1
            RETURNING product_id, name, price
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        match &result {
            Some(updated) => info!("🔄 Updated product ID {}", updated.product_id),
            None => info!("🔍 No product with ID {} to update", id),
        }

        Ok(result)
    }

    async fn delete_product(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("❌ Hard deleting product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            DELETE FROM products
            WHERE product_id = $1
            RETURNING product_id, name, price
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if result.is_some() {
            info!("✅ Product ID {} permanently deleted", id);
        }

        Ok(result)
    }
}
