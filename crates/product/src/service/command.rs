use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
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
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service", "ProductCommandService");

        Self {
            command,
            tracer: OperationTracer::new("product-command-service", metrics),
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        match self.command.create_product(req).await {
            Ok(product) => {
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product created successfully",
                );
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                error!("❌ Failed to create product '{}': {e:?}", req.name);
                self.tracer.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to create product: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🔄 Updating product ID: {id}");

        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.command.update_product(id, req).await {
            Ok(Some(product)) => {
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product updated successfully",
                );
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Product not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                error!("❌ Failed to update product ID {id}: {e:?}");
                self.tracer.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to update product: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        info!("🧨 Permanently deleting product ID: {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.command.delete_product(id).await {
            Ok(Some(_)) => {
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product deleted permanently",
                );
                Ok(())
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Product not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                error!("❌ Failed to delete product ID {id}: {e:?}");
                self.tracer.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to delete product: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}
