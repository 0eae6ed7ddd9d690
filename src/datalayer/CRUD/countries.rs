use async_trait::async_trait;
use sea_query::Order;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::datalayer::CRUD::helper::{fetch_all_as, fetch_one_as, fetch_optional_as};
use crate::datalayer::CRUD::sql_generator::{FluentDelete, FluentInsert, FluentSelect, FluentUpdate};
use crate::datalayer::CRUD::types::{Countries, Country, CountryRow, IdSelector, NewCountry};
use crate::errors::errors::ServiceResult;

/// Persistence operations over the `country` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryStore: Send + Sync {
    async fn find_all(&self) -> ServiceResult<Vec<CountryRow>>;

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<CountryRow>>;

    async fn create(&self, country: &NewCountry) -> ServiceResult<CountryRow>;

    /// Overwrite name and code of `country.id`. `None` when no row matched.
    async fn update(&self, country: &Country) -> ServiceResult<Option<CountryRow>>;

    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<CountryRow>>;
}

/// PostgreSQL backed [`CountryStore`]
#[derive(Clone)]
pub struct PgCountryStore {
    pool: Arc<PgPool>,
}

impl PgCountryStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn select() -> FluentSelect {
        FluentSelect::from(Countries::Table)
            .column(Countries::CountryId)
            .column(Countries::CountryName)
            .column(Countries::CountryCode)
    }
}

#[async_trait]
impl CountryStore for PgCountryStore {
    #[instrument(skip(self), fields(table = "country"))]
    async fn find_all(&self) -> ServiceResult<Vec<CountryRow>> {
        let statement = Self::select()
            .order_by(Countries::CountryId, Order::Asc)
            .render();

        fetch_all_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "country"))]
    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<CountryRow>> {
        let statement = Self::select().filter(Countries::CountryId, id).render();

        fetch_optional_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "country"))]
    async fn create(&self, country: &NewCountry) -> ServiceResult<CountryRow> {
        let statement = FluentInsert::into(Countries::Table)
            .value(Countries::CountryName, country.name.as_str())
            .value(Countries::CountryCode, country.code.as_str())
            .returning(Countries::CountryId)
            .returning(Countries::CountryName)
            .returning(Countries::CountryCode)
            .render()?;

        let row: CountryRow = fetch_one_as(&self.pool, statement).await?;
        info!(country_id = row.country_id, "Country created");
        Ok(row)
    }

    #[instrument(skip(self), fields(table = "country"))]
    async fn update(&self, country: &Country) -> ServiceResult<Option<CountryRow>> {
        let statement = FluentUpdate::table(Countries::Table)
            .value(Countries::CountryName, country.name.as_str())
            .value(Countries::CountryCode, country.code.as_str())
            .filter(Countries::CountryId, country.id)
            .returning(Countries::CountryId)
            .returning(Countries::CountryName)
            .returning(Countries::CountryCode)
            .render();

        fetch_optional_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "country"))]
    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<CountryRow>> {
        let statement = FluentDelete::from(Countries::Table)
            .filter_in(Countries::CountryId, ids.ids().iter().copied())
            .returning(Countries::CountryId)
            .returning(Countries::CountryName)
            .returning(Countries::CountryCode)
            .render();

        let rows: Vec<CountryRow> = fetch_all_as(&self.pool, statement).await?;
        info!(requested = ids.ids().len(), deleted = rows.len(), "Countries deleted");
        Ok(rows)
    }
}
