use std::sync::Arc;

use crate::config::DataBackend;
use crate::controllayer::helper::forbidden::ForbiddenIds;
use crate::datalayer::CRUD::{
    CarStore, CountryStore, MemoryStore, PgCarStore, PgCountryStore, PgUniversityStore,
    UniversityStore,
};
use crate::datalayer::db_ops::DbManager;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cars: Arc<dyn CarStore>,
    pub countries: Arc<dyn CountryStore>,
    pub universities: Arc<dyn UniversityStore>,
    /// Protected ids per entity
    pub forbidden: Arc<ForbiddenIds>,
    pub backend: DataBackend,
    /// Present only for the PostgreSQL backend
    pub database: Option<DbManager>,
}

impl AppState {
    pub fn new(
        cars: Arc<dyn CarStore>,
        countries: Arc<dyn CountryStore>,
        universities: Arc<dyn UniversityStore>,
        forbidden: ForbiddenIds,
    ) -> Self {
        Self {
            cars,
            countries,
            universities,
            forbidden: Arc::new(forbidden),
            backend: DataBackend::Memory,
            database: None,
        }
    }

    /// State backed by PostgreSQL through a shared pool
    pub fn postgres(db: DbManager, forbidden: ForbiddenIds) -> Self {
        let pool = db.pool_arc();
        Self {
            cars: Arc::new(PgCarStore::new(Arc::clone(&pool))),
            countries: Arc::new(PgCountryStore::new(Arc::clone(&pool))),
            universities: Arc::new(PgUniversityStore::new(pool)),
            forbidden: Arc::new(forbidden),
            backend: DataBackend::Postgres,
            database: Some(db),
        }
    }

    /// State where every entity lives in one in-memory store
    pub fn in_memory(store: Arc<MemoryStore>, forbidden: ForbiddenIds) -> Self {
        Self::new(store.clone(), store.clone(), store, forbidden)
    }
}
