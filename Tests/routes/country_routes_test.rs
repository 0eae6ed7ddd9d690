use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use reference_data_backend::{
    controllayer::helper::forbidden::ForbiddenIds, datalayer::CRUD::MemoryStore,
    routes::create_router, state::AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a seeded in-memory store (country 1 exists and is protected)
fn create_test_router() -> Router {
    create_router(AppState::in_memory(
        Arc::new(MemoryStore::seeded()),
        ForbiddenIds::default(),
    ))
}

async fn post(app: &Router, path: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn error(message: &str) -> Value {
    json!({ "status": "error", "message": message })
}

#[tokio::test]
async fn test_find_all_countries() {
    let app = create_test_router();

    let body = post(&app, "/find-all-countries", json!({})).await;
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": [{ "id": 1, "name": "Unknown", "code": "XX" }]
        })
    );
}

#[tokio::test]
async fn test_find_missing_country_is_empty() {
    let app = create_test_router();

    let body = post(&app, "/find-by-country-id", json!({ "id": 999 })).await;
    assert_eq!(body, json!({ "status": "success", "data": [] }));
}

#[tokio::test]
async fn test_create_country_validation_order() {
    let app = create_test_router();

    let body = post(&app, "/create-new-country", json!({ "name": "", "code": "US" })).await;
    assert_eq!(body, error("Country name is empty !"));

    let body = post(&app, "/create-new-country", json!({ "name": "France", "code": " " })).await;
    assert_eq!(body, error("Country code is empty !"));

    let body = post(&app, "/create-new-country", json!({ "name": "France" })).await;
    assert_eq!(body, error("Country code is empty !"));
}

#[tokio::test]
async fn test_create_update_delete_country() {
    let app = create_test_router();

    let created = post(&app, "/create-new-country", json!({ "name": "France", "code": "FR" })).await;
    assert_eq!(
        created,
        json!({ "status": "success", "data": { "id": 2, "name": "France", "code": "FR" } })
    );

    let updated = post(
        &app,
        "/update-country",
        json!({ "id": 2, "name": "Spain", "code": "ES" }),
    )
    .await;
    assert_eq!(
        updated,
        json!({ "status": "success", "data": { "id": 2, "name": "Spain", "code": "ES" } })
    );

    let found = post(&app, "/find-by-country-id", json!({ "id": 2 })).await;
    assert_eq!(found, updated);

    let deleted = post(&app, "/delete-country", json!({ "id": [2] })).await;
    assert_eq!(
        deleted,
        json!({ "status": "success", "data": [{ "id": 2, "name": "Spain", "code": "ES" }] })
    );

    let found = post(&app, "/find-by-country-id", json!({ "id": 2 })).await;
    assert_eq!(found, json!({ "status": "success", "data": [] }));
}

#[tokio::test]
async fn test_update_requires_code() {
    let app = create_test_router();
    post(&app, "/create-new-country", json!({ "name": "France", "code": "FR" })).await;

    let body = post(&app, "/update-country", json!({ "id": 2, "name": "Spain" })).await;
    assert_eq!(body, error("Country code is empty !"));
}

#[tokio::test]
async fn test_protected_country_cannot_change() {
    let app = create_test_router();

    let body = post(
        &app,
        "/update-country",
        json!({ "id": 1, "name": "Nowhere", "code": "NO" }),
    )
    .await;
    assert_eq!(body, error("Country id 1 is forbidden !"));

    let body = post(&app, "/delete-country", json!({ "id": "1" })).await;
    assert_eq!(body, error("Country id 1 is forbidden !"));

    let body = post(&app, "/find-by-country-id", json!({ "id": 1 })).await;
    assert_eq!(body["data"]["code"], "XX");
}

#[tokio::test]
async fn test_malformed_json_counts_as_no_fields() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/delete-country")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, error("Country id is required !"));
}
