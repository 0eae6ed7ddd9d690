use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::datalayer::db_ops::{verify_all_tables, DatabaseHealth, TableVerification};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
    /// `postgres` or `memory`
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseReport>,
}

/// Database part of the health report
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseReport {
    pub status: String,
    pub latency_ms: Option<u64>,
    pub pool_size: Option<u32>,
    pub idle_connections: Option<usize>,
    /// Tables the stores need that are not present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_tables: Vec<String>,
    /// Set when the tables could not be verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_check_error: Option<String>,
}

impl DatabaseReport {
    fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_ms: None,
            pool_size: None,
            idle_connections: None,
            missing_tables: Vec::new(),
            table_check_error: None,
        }
    }
}

/// Report for a database that answered the ping. Anything short of a
/// complete table verification is `degraded`.
fn database_report(
    health: &DatabaseHealth,
    tables: Result<Vec<TableVerification>, sqlx::Error>,
) -> DatabaseReport {
    let (missing_tables, table_check_error) = match tables {
        Ok(tables) => (missing(&tables), None),
        Err(e) => {
            warn!(error = %e, "Table verification failed");
            (Vec::new(), Some(e.to_string()))
        }
    };
    let verified = missing_tables.is_empty() && table_check_error.is_none();

    DatabaseReport {
        status: if verified { "healthy" } else { "degraded" }.to_string(),
        latency_ms: Some(health.latency_ms),
        pool_size: Some(health.pool_size),
        idle_connections: Some(health.idle_connections),
        missing_tables,
        table_check_error,
    }
}

fn missing(tables: &[TableVerification]) -> Vec<String> {
    tables
        .iter()
        .filter(|table| !table.exists)
        .map(|table| table.table_name.clone())
        .collect()
}

/// Build the health report.
///
/// The in-memory backend is always healthy. With PostgreSQL the pool is
/// pinged and the required tables are verified; a failed ping, a missing
/// table or a failed verification yields 503.
pub async fn health_report(state: &AppState) -> (StatusCode, HealthResponse) {
    let database = match &state.database {
        None => None,
        Some(db) => Some(match db.health_check().await {
            Ok(health) => database_report(&health, verify_all_tables(db.pool()).await),
            Err(e) => {
                error!(error = %e, "Database ping failed");
                DatabaseReport::unhealthy()
            }
        }),
    };

    let healthy = database
        .as_ref()
        .map_or(true, |report| report.status == "healthy");

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        backend: state.backend.to_string(),
        database,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, response)
}

/// Returns 200 whenever the process is serving requests
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Ready when the backing store answers
pub async fn readiness(state: &AppState) -> StatusCode {
    match &state.database {
        Some(db) if db.test_connection().await.is_err() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllayer::helper::forbidden::ForbiddenIds;
    use crate::datalayer::CRUD::MemoryStore;
    use std::sync::Arc;

    fn memory_state() -> AppState {
        AppState::in_memory(Arc::new(MemoryStore::seeded()), ForbiddenIds::default())
    }

    #[tokio::test]
    async fn test_memory_backend_is_healthy() {
        let (status, response) = health_report(&memory_state()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "healthy");
        assert_eq!(response.backend, "memory");
        assert!(response.database.is_none());
    }

    #[tokio::test]
    async fn test_liveness_and_readiness() {
        assert_eq!(liveness().await, StatusCode::OK);
        assert_eq!(readiness(&memory_state()).await, StatusCode::OK);
    }

    #[test]
    fn test_missing_tables_are_reported() {
        let tables = vec![
            TableVerification {
                table_name: "car".to_string(),
                exists: true,
            },
            TableVerification {
                table_name: "user_university".to_string(),
                exists: false,
            },
        ];
        assert_eq!(missing(&tables), vec!["user_university".to_string()]);
    }

    fn pool_health() -> DatabaseHealth {
        DatabaseHealth {
            is_healthy: true,
            latency_ms: 3,
            pool_size: 4,
            idle_connections: 2,
        }
    }

    #[test]
    fn test_failed_table_verification_is_degraded() {
        let report = database_report(&pool_health(), Err(sqlx::Error::PoolTimedOut));
        assert_eq!(report.status, "degraded");
        assert!(report.table_check_error.is_some());
        assert!(report.missing_tables.is_empty());
        assert_eq!(report.latency_ms, Some(3));
    }

    #[test]
    fn test_verified_tables_are_healthy() {
        let tables = vec![TableVerification {
            table_name: "car".to_string(),
            exists: true,
        }];
        let report = database_report(&pool_health(), Ok(tables));
        assert_eq!(report.status, "healthy");
        assert!(report.table_check_error.is_none());
    }
}
