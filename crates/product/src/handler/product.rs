use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    middleware::json::JsonPayload,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/products",
    tag = "Product",
    responses(
        (status = 200, description = "Every stored product", body = Vec<ProductResponse>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped fields", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    JsonPayload(body): JsonPayload<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped fields", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    JsonPayload(body): JsonPayload<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_product(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product permanently deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_product(id).await?;
    Ok((StatusCode::OK, "Deleted"))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/products", get(get_products))
        .route("/products", post(create_product))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
