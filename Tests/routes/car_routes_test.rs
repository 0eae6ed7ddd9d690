use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use reference_data_backend::{
    controllayer::helper::forbidden::{ForbiddenIds, ForbiddenSet},
    datalayer::CRUD::MemoryStore,
    routes::create_router,
    state::AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a seeded in-memory store (cars 1 and 2 exist and are protected)
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
async fn test_find_all_lists_seeded_cars() {
    let app = create_test_router();

    let body = post(&app, "/find-all-cars", json!({})).await;
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": [
                { "id": 1, "name": "Unknown" },
                { "id": 2, "name": "Other" }
            ]
        })
    );
}

#[tokio::test]
async fn test_find_all_is_stable_without_writes() {
    let app = create_test_router();

    let first = post(&app, "/find-all-cars", json!({})).await;
    let second = post(&app, "/find-all-cars", json!({})).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_create_then_find_by_id() {
    let app = create_test_router();

    let created = post(&app, "/create-new-car", json!({ "name": "Toyota" })).await;
    assert_eq!(created["status"], "success");
    assert_eq!(created["data"]["name"], "Toyota");
    let id = created["data"]["id"].as_i64().unwrap();

    let found = post(&app, "/find-by-car-id", json!({ "id": id })).await;
    assert_eq!(
        found,
        json!({ "status": "success", "data": { "id": id, "name": "Toyota" } })
    );

    // String ids are accepted too
    let found = post(&app, "/find-by-car-id", json!({ "id": id.to_string() })).await;
    assert_eq!(found["data"]["name"], "Toyota");
}

#[tokio::test]
async fn test_find_by_id_validation() {
    let app = create_test_router();

    let body = post(&app, "/find-by-car-id", json!({})).await;
    assert_eq!(body, error("Car id is required !"));

    let body = post(&app, "/find-by-car-id", json!({ "id": "abc" })).await;
    assert_eq!(body, error("Car id abc is not a valid number !"));

    let body = post(&app, "/find-by-car-id", json!({ "id": 999 })).await;
    assert_eq!(body, json!({ "status": "success", "data": [] }));
}

#[tokio::test]
async fn test_missing_body_counts_as_no_fields() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/find-by-car-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, error("Car id is required !"));
}

#[tokio::test]
async fn test_create_rejects_empty_name() {
    let app = create_test_router();

    let body = post(&app, "/create-new-car", json!({ "name": "  " })).await;
    assert_eq!(body, error("Car name is empty !"));

    let body = post(&app, "/create-new-car", json!({ "name": 12 })).await;
    assert_eq!(body, error("Car name must be a string !"));

    let cars = post(&app, "/find-all-cars", json!({})).await;
    assert_eq!(cars["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_change_car_name() {
    let app = create_test_router();

    let created = post(&app, "/create-new-car", json!({ "name": "Toyota" })).await;
    let id = created["data"]["id"].clone();

    let body = post(&app, "/change-car-name", json!({ "id": id, "name": "Lexus" })).await;
    assert_eq!(body, json!({ "status": "success", "data": { "id": id, "name": "Lexus" } }));

    let body = post(&app, "/change-car-name", json!({ "id": 500, "name": "Lexus" })).await;
    assert_eq!(body, json!({ "status": "success", "data": [] }));
}

#[tokio::test]
async fn test_change_forbidden_car_is_rejected() {
    let app = create_test_router();

    let body = post(&app, "/change-car-name", json!({ "id": 2, "name": "Hacked" })).await;
    assert_eq!(body, error("Car id 2 is forbidden !"));

    let found = post(&app, "/find-by-car-id", json!({ "id": 2 })).await;
    assert_eq!(found["data"]["name"], "Other");
}

#[tokio::test]
async fn test_delete_list_with_forbidden_id_deletes_nothing() {
    let forbidden = ForbiddenIds {
        cars: ForbiddenSet::new([2]),
        ..ForbiddenIds::default()
    };
    let app = create_router(AppState::in_memory(Arc::new(MemoryStore::seeded()), forbidden));
    post(&app, "/create-new-car", json!({ "name": "Toyota" })).await;

    let body = post(&app, "/delete-car", json!({ "id": [1, 2, 3] })).await;
    assert_eq!(body, error("Car id 2 is forbidden !"));

    let cars = post(&app, "/find-all-cars", json!({})).await;
    assert_eq!(cars["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_delete_scalar_and_list() {
    let app = create_test_router();
    for name in ["Toyota", "Honda", "Fiat"] {
        post(&app, "/create-new-car", json!({ "name": name })).await;
    }

    let body = post(&app, "/delete-car", json!({ "id": 3 })).await;
    assert_eq!(body, json!({ "status": "success", "data": [{ "id": 3, "name": "Toyota" }] }));

    let body = post(&app, "/delete-car", json!({ "id": [5, "4", 77] })).await;
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": [{ "id": 4, "name": "Honda" }, { "id": 5, "name": "Fiat" }]
        })
    );

    let body = post(&app, "/delete-car", json!({ "id": 3 })).await;
    assert_eq!(body, json!({ "status": "success", "data": [] }));

    let body = post(&app, "/delete-car", json!({ "id": [] })).await;
    assert_eq!(body, error("Car id list is empty !"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/find-all-cars")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
