pub mod health;

pub use health::{health_report, liveness, readiness, DatabaseReport, HealthResponse};
