use sea_query::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, PgPool, Postgres};

use crate::errors::errors::{ServiceError, ServiceResult};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Bind the parameters rendered by sea-query onto a sqlx query, in order.
pub fn bind_query(mut query: PgQuery<'_>, values: sea_query::Values) -> ServiceResult<PgQuery<'_>> {
    for value in values.0 {
        query = match value {
            Value::Bool(v) => query.bind(v),
            Value::TinyInt(v) => query.bind(v.map(i16::from)),
            Value::SmallInt(v) => query.bind(v),
            Value::Int(v) => query.bind(v),
            Value::BigInt(v) => query.bind(v),
            Value::Float(v) => query.bind(v),
            Value::Double(v) => query.bind(v),
            Value::String(v) => query.bind(v.map(|s| *s)),
            Value::Char(v) => query.bind(v.map(|c| c.to_string())),
            other => {
                return Err(ServiceError::InternalServerError(format!(
                    "Unsupported query parameter: {:?}",
                    other
                )));
            }
        };
    }
    Ok(query)
}

pub async fn fetch_all_as<T>(pool: &PgPool, statement: (String, sea_query::Values)) -> ServiceResult<Vec<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let (sql, values) = statement;
    let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
    let rows = query.fetch_all(pool).await?;

    rows.iter()
        .map(|row| T::from_row(row).map_err(ServiceError::from))
        .collect()
}

pub async fn fetch_optional_as<T>(
    pool: &PgPool,
    statement: (String, sea_query::Values),
) -> ServiceResult<Option<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let (sql, values) = statement;
    let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
    let row = query.fetch_optional(pool).await?;

    row.as_ref()
        .map(|row| T::from_row(row))
        .transpose()
        .map_err(ServiceError::from)
}

pub async fn fetch_one_as<T>(pool: &PgPool, statement: (String, sea_query::Values)) -> ServiceResult<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let (sql, values) = statement;
    let query = bind_query(sqlx::query::<Postgres>(&sql), values)?;
    let row = query.fetch_one(pool).await?;

    T::from_row(&row).map_err(ServiceError::from)
}
