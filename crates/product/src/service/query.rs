use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::product::ProductResponse,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "ProductQueryService");

        Self {
            query,
            tracer: OperationTracer::new("product-query-service", metrics),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let products = match self.query.find_all().await {
            Ok(products) => {
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Products retrieved from DB",
                );
                products
            }
            Err(e) => {
                let msg = format!("❌ Failed to fetch all products: {e:?}");
                error!("{msg}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        info!("✅ Found {} products", data.len());

        Ok(data)
    }

    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                info!("✅ Found product: '{}' (ID: {id})", product.name);
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product retrieved from DB",
                );
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                info!("🔍 Product not found with ID: {id}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Product not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                let msg = format!("❌ Database error while finding product ID {id}: {e:?}");
                error!("{msg}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(e))
            }
        }
    }
}
