use async_trait::async_trait;
use sea_query::{Expr, Order};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::datalayer::CRUD::helper::{fetch_all_as, fetch_one_as, fetch_optional_as};
use crate::datalayer::CRUD::sql_generator::{FluentDelete, FluentInsert, FluentSelect, FluentUpdate};
use crate::datalayer::CRUD::types::{
    IdSelector, Universities, University, UniversityRow, UserUniversities,
};
use crate::errors::errors::ServiceResult;

/// Persistence operations over the `university` table and its user relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityStore: Send + Sync {
    async fn find_all(&self) -> ServiceResult<Vec<UniversityRow>>;

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<UniversityRow>>;

    /// Universities linked to `user_id` through `user_university`
    async fn find_by_user_id(&self, user_id: i32) -> ServiceResult<Vec<UniversityRow>>;

    async fn create(&self, name: &str) -> ServiceResult<UniversityRow>;

    async fn update(&self, university: &University) -> ServiceResult<Option<UniversityRow>>;

    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<UniversityRow>>;
}

/// PostgreSQL backed [`UniversityStore`]
#[derive(Clone)]
pub struct PgUniversityStore {
    pool: Arc<PgPool>,
}

impl PgUniversityStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniversityStore for PgUniversityStore {
    #[instrument(skip(self), fields(table = "university"))]
    async fn find_all(&self) -> ServiceResult<Vec<UniversityRow>> {
        let statement = FluentSelect::from(Universities::Table)
            .column(Universities::UniversityId)
            .column(Universities::UniversityName)
            .order_by(Universities::UniversityId, Order::Asc)
            .render();

        fetch_all_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "university"))]
    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<UniversityRow>> {
        let statement = FluentSelect::from(Universities::Table)
            .column(Universities::UniversityId)
            .column(Universities::UniversityName)
            .filter(Universities::UniversityId, id)
            .render();

        fetch_optional_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "university"))]
    async fn find_by_user_id(&self, user_id: i32) -> ServiceResult<Vec<UniversityRow>> {
        // SELECT university.* FROM university
        // INNER JOIN user_university ON user_university.university_id = university.university_id
        // WHERE user_university.user_id = $1
        let statement = FluentSelect::from(Universities::Table)
            .qualified_column(Universities::Table, Universities::UniversityId)
            .qualified_column(Universities::Table, Universities::UniversityName)
            .join(
                UserUniversities::Table,
                Expr::col((UserUniversities::Table, UserUniversities::UniversityId))
                    .equals((Universities::Table, Universities::UniversityId)),
            )
            .and_where(Expr::col((UserUniversities::Table, UserUniversities::UserId)).eq(user_id))
            .order_by_expr(
                Expr::col((Universities::Table, Universities::UniversityId)),
                Order::Asc,
            )
            .render();

        fetch_all_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "university"))]
    async fn create(&self, name: &str) -> ServiceResult<UniversityRow> {
        let statement = FluentInsert::into(Universities::Table)
            .value(Universities::UniversityName, name)
            .returning(Universities::UniversityId)
            .returning(Universities::UniversityName)
            .render()?;

        let row: UniversityRow = fetch_one_as(&self.pool, statement).await?;
        info!(university_id = row.university_id, "University created");
        Ok(row)
    }

    #[instrument(skip(self), fields(table = "university"))]
    async fn update(&self, university: &University) -> ServiceResult<Option<UniversityRow>> {
        let statement = FluentUpdate::table(Universities::Table)
            .value(Universities::UniversityName, university.name.as_str())
            .filter(Universities::UniversityId, university.id)
            .returning(Universities::UniversityId)
            .returning(Universities::UniversityName)
            .render();

        fetch_optional_as(&self.pool, statement).await
    }

    #[instrument(skip(self), fields(table = "university"))]
    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<UniversityRow>> {
        let statement = FluentDelete::from(Universities::Table)
            .filter_in(Universities::UniversityId, ids.ids().iter().copied())
            .returning(Universities::UniversityId)
            .returning(Universities::UniversityName)
            .render();

        let rows: Vec<UniversityRow> = fetch_all_as(&self.pool, statement).await?;
        info!(requested = ids.ids().len(), deleted = rows.len(), "Universities deleted");
        Ok(rows)
    }
}
