use std::sync::Arc;

use reference_data_backend::{
    config::{DataBackend, ServerConfig},
    datalayer::{db_ops::initialize_database_with_config, DbConfig, CRUD::MemoryStore},
    logging::{init_telemetry, shutdown_telemetry},
    routes::create_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables first
    dotenvy::dotenv().ok();

    init_telemetry(None)?;

    let config = ServerConfig::from_env()?;

    tracing::info!(
        backend = %config.backend,
        forbidden_cars = %config.forbidden.cars,
        forbidden_countries = %config.forbidden.countries,
        forbidden_universities = %config.forbidden.universities,
        "Starting Reference Data Backend"
    );

    let state = match config.backend {
        DataBackend::Postgres => {
            let db = initialize_database_with_config(DbConfig::from_env()?).await?;
            if config.run_migrations {
                db.run_migrations().await?;
            }
            tracing::info!("Database initialized successfully");
            AppState::postgres(db, config.forbidden.clone())
        }
        DataBackend::Memory => {
            tracing::warn!("Using the in-memory backend, data is lost on exit");
            AppState::in_memory(Arc::new(MemoryStore::seeded()), config.forbidden.clone())
        }
    };
    let database = state.database.clone();

    let app = create_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        address = %addr,
        port = config.port,
        "Server listening and ready to accept connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.shutdown().await;
    }
    shutdown_telemetry();

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::warn!("Shutdown signal received, cleaning up...");
}
