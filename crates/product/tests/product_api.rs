use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use product::{
    domain::response::product::ProductResponse, handler::AppRouter,
    repository::ProductRepository, state::AppState,
};
use serde_json::{Value, json};
use shared::errors::ErrorResponse;
use tower::ServiceExt;

fn app() -> Router {
    AppRouter::build(AppState::new(ProductRepository::in_memory()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(payload) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn product_lifecycle() {
    let app = app();

    let response = send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "Widget", "price": 9.99})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: ProductResponse = json_body(response).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Widget");
    assert_eq!(created.price, 9.99);

    let response = send(&app, "GET", "/products/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: ProductResponse = json_body(response).await;
    assert_eq!(fetched, created);

    let response = send(
        &app,
        "PUT",
        "/products/1",
        Some(json!({"name": "Gadget", "price": 12.5})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductResponse = json_body(response).await;
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Gadget");
    assert_eq!(updated.price, 12.5);

    let response = send(&app, "GET", "/products/1", None).await;
    let fetched: ProductResponse = json_body(response).await;
    assert_eq!(fetched, updated);

    let response = send(&app, "DELETE", "/products/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Deleted");

    let response = send(&app, "GET", "/products/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn missing_product_is_404_without_side_effects() {
    let app = app();

    send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "Widget", "price": 9.99})),
    )
    .await;

    let response = send(&app, "GET", "/products/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let response = send(
        &app,
        "PUT",
        "/products/99",
        Some(json!({"name": "Ghost", "price": 1.0})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, "DELETE", "/products/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, "GET", "/products", None).await;
    let all: Vec<ProductResponse> = json_body(response).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Widget");
}

#[tokio::test]
async fn list_returns_every_stored_product() {
    let app = app();

    let response = send(&app, "GET", "/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let empty: Vec<ProductResponse> = json_body(response).await;
    assert!(empty.is_empty());

    for (name, price) in [("Widget", 9.99), ("Gadget", 12.5), ("Doohickey", 3.0)] {
        let response = send(
            &app,
            "POST",
            "/products",
            Some(json!({"name": name, "price": price})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    send(&app, "DELETE", "/products/2", None).await;

    let response = send(&app, "GET", "/products", None).await;
    let mut all: Vec<ProductResponse> = json_body(response).await;
    all.sort_by_key(|p| p.id);

    let names: Vec<_> = all.iter().map(|p| (p.id, p.name.as_str())).collect();
    assert_eq!(names, vec![(1, "Widget"), (3, "Doohickey")]);
}

#[tokio::test]
async fn ids_come_from_the_store_not_the_payload() {
    let app = app();

    let response = send(
        &app,
        "POST",
        "/products",
        Some(json!({"id": 77, "name": "Widget", "price": 9.99})),
    )
    .await;
    let created: ProductResponse = json_body(response).await;
    assert_eq!(created.id, 1);

    let response = send(
        &app,
        "PUT",
        "/products/1",
        Some(json!({"id": 5, "name": "Gadget", "price": 12.5})),
    )
    .await;
    let updated: ProductResponse = json_body(response).await;
    assert_eq!(updated.id, 1);

    let response = send(&app, "GET", "/products/5", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_payload_is_rejected_with_error_envelope() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.status, "error");

    let response = send(&app, "POST", "/products", Some(json!({"name": "Widget"}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, "GET", "/products", None).await;
    let all: Vec<ProductResponse> = json_body(response).await;
    assert!(all.is_empty());
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let response = send(&app(), "GET", "/products/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_reflect_served_requests() {
    let app = app();

    send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "Widget", "price": 9.99})),
    )
    .await;
    send(&app, "GET", "/products/42", None).await;

    let response = send(&app, "GET", "/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains(
        r#"product_command_service_request_counter_total{method="Post",status="Success"} 1"#
    ));
    assert!(text.contains(
        r#"product_query_service_request_counter_total{method="Get",status="Error"} 1"#
    ));
}

#[tokio::test]
async fn openapi_document_lists_product_paths() {
    let response = send(&app(), "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc: Value = json_body(response).await;
    assert!(doc["paths"]["/products"].is_object());
    assert!(doc["paths"]["/products/{id}"]["delete"].is_object());

    for (path, method) in [("/products", "post"), ("/products/{id}", "put")] {
        let responses = &doc["paths"][path][method]["responses"];
        for status in ["400", "415", "422"] {
            assert!(
                responses[status].is_object(),
                "{method} {path} does not document {status}"
            );
        }
    }
}
