use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, price
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, price
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }
}
