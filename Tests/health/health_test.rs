use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use reference_data_backend::{
    controllayer::{health::HealthResponse, helper::forbidden::ForbiddenIds},
    datalayer::CRUD::MemoryStore,
    routes::create_router,
    state::AppState,
};
use tower::ServiceExt;

/// Full router over the in-memory backend
fn create_test_router() -> Router {
    create_router(AppState::in_memory(
        Arc::new(MemoryStore::seeded()),
        ForbiddenIds::default(),
    ))
}

async fn get(uri: &str) -> axum::response::Response {
    create_test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_check_returns_200() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_check_response_structure() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health_response: HealthResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(health_response.status, "healthy");
    assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health_response.backend, "memory");
    assert!(health_response.timestamp > 0);
    assert!(health_response.database.is_none());
}

#[tokio::test]
async fn test_health_omits_database_for_memory_backend() {
    let response = get("/health").await;
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(json.get("database").is_none());
}

#[tokio::test]
async fn test_liveness_and_readiness() {
    assert_eq!(get("/health/live").await.status(), StatusCode::OK);
    assert_eq!(get("/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_get_only() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_postgres_health_when_configured() {
    // Requires a running PostgreSQL instance
    if std::env::var("DATABASE_URL").is_err() {
        return;
    }

    let Ok(db) = reference_data_backend::datalayer::initialize_database().await else {
        return;
    };
    db.run_migrations().await.unwrap();

    let app = create_router(AppState::postgres(db, ForbiddenIds::default()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.backend, "postgres");
    assert_eq!(health.database.unwrap().status, "healthy");
}
