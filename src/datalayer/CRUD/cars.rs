use async_trait::async_trait;
use sea_query::Order;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::datalayer::CRUD::helper::{fetch_all_as, fetch_one_as, fetch_optional_as};
use crate::datalayer::CRUD::sql_generator::{FluentDelete, FluentInsert, FluentSelect, FluentUpdate};
use crate::datalayer::CRUD::types::{Car, CarRow, Cars, IdSelector};
use crate::errors::errors::ServiceResult;

/// Persistence operations over the `car` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarStore: Send + Sync {
    /// All cars, ordered by id
    async fn find_all(&self) -> ServiceResult<Vec<CarRow>>;

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<CarRow>>;

    /// Insert a car; the store assigns its id
    async fn create(&self, name: &str) -> ServiceResult<CarRow>;

    /// Rename the car with `car.id`. `None` when no row matched.
    async fn update(&self, car: &Car) -> ServiceResult<Option<CarRow>>;

    /// Remove the selected cars and return the rows that were removed
    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<CarRow>>;
}

/// PostgreSQL backed [`CarStore`]
#[derive(Clone)]
pub struct PgCarStore {
    pool: Arc<PgPool>,
}

impl PgCarStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    #[instrument(skip(self), fields(table = "car"))]
    async fn find_all(&self) -> ServiceResult<Vec<CarRow>> {
        let statement = FluentSelect::from(Cars::Table)
            .column(Cars::CarId)
            .column(Cars::CarName)
            .order_by(Cars::CarId, Order::Asc)
            .render();

        fetch_all_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "car"))]
    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<CarRow>> {
        let statement = FluentSelect::from(Cars::Table)
            .column(Cars::CarId)
            .column(Cars::CarName)
            .filter(Cars::CarId, id)
            .render();

        fetch_optional_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "car"))]
    async fn create(&self, name: &str) -> ServiceResult<CarRow> {
        let statement = FluentInsert::into(Cars::Table)
            .value(Cars::CarName, name)
            .returning(Cars::CarId)
            .returning(Cars::CarName)
            .render()?;

        let row: CarRow = fetch_one_as(&self.pool, statement).await?;
        info!(car_id = row.car_id, "Car created");
        Ok(row)
    }

    #[instrument(skip(self), fields(table = "car"))]
    async fn update(&self, car: &Car) -> ServiceResult<Option<CarRow>> {
        let statement = FluentUpdate::table(Cars::Table)
            .value(Cars::CarName, car.name.as_str())
            .filter(Cars::CarId, car.id)
            .returning(Cars::CarId)
            .returning(Cars::CarName)
            .render();

        fetch_optional_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "car"))]
    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<CarRow>> {
        let statement = FluentDelete::from(Cars::Table)
            .filter_in(Cars::CarId, ids.ids().iter().copied())
            .returning(Cars::CarId)
            .returning(Cars::CarName)
            .render();

        let rows: Vec<CarRow> = fetch_all_as(&self.pool, statement).await?;
        info!(requested = ids.ids().len(), deleted = rows.len(), "Cars deleted");
        Ok(rows)
    }
}
