use sea_query::{Alias, Expr, Iden, Order, PostgresQueryBuilder, Query, SimpleExpr, Value};

use crate::errors::errors::{ServiceError, ServiceResult};

/* ----------------------------- FLUENT BUILDER WRAPPER ----------------------------- */

// Helper to check if a Value is None (NULL)
fn is_value_none(val: &Value) -> bool {
    matches!(
        val,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
    )
}

fn alias<I: Iden>(iden: I) -> Alias {
    Alias::new(iden.to_string())
}

// --- INSERT ---

pub struct FluentInsert {
    table: Alias,
    values: Vec<(Alias, Value)>,
    returning: Vec<Alias>,
}

impl FluentInsert {
    pub fn into<T: Iden>(table: T) -> Self {
        Self {
            table: alias(table),
            values: vec![],
            returning: vec![],
        }
    }

    pub fn value<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        let val: Value = v.into();
        if !is_value_none(&val) {
            self.values.push((alias(col), val));
        }
        self
    }

    pub fn returning<C: Iden>(mut self, col: C) -> Self {
        self.returning.push(alias(col));
        self
    }

    pub fn render(self) -> ServiceResult<(String, sea_query::Values)> {
        let mut query = Query::insert();
        query.into_table(self.table);

        let (cols, vals): (Vec<Alias>, Vec<Value>) = self.values.into_iter().unzip();

        query.columns(cols);
        query
            .values(vals.into_iter().map(SimpleExpr::Value))
            .map_err(|e| ServiceError::InternalServerError(format!("Invalid insert: {}", e)))?;

        if !self.returning.is_empty() {
            query.returning(Query::returning().columns(self.returning));
        }

        Ok(query.build(PostgresQueryBuilder))
    }
}

// --- SELECT ---

pub struct FluentSelect {
    table: Alias,
    columns: Vec<(Option<Alias>, Alias)>,
    filters: Vec<(Alias, Value)>,
    conditions: Vec<SimpleExpr>,         // Generic WHERE conditions
    joins: Vec<(Alias, SimpleExpr)>,     // (Table, ON Condition)
    order_by: Vec<(SimpleExpr, Order)>,
}

impl FluentSelect {
    pub fn from<T: Iden>(table: T) -> Self {
        Self {
            table: alias(table),
            columns: vec![],
            filters: vec![],
            conditions: vec![],
            joins: vec![],
            order_by: vec![],
        }
    }

    pub fn column<C: Iden>(mut self, col: C) -> Self {
        self.columns.push((None, alias(col)));
        self
    }

    /// Column prefixed with its table, for joined selects
    pub fn qualified_column<T: Iden, C: Iden>(mut self, table: T, col: C) -> Self {
        self.columns.push((Some(alias(table)), alias(col)));
        self
    }

    pub fn filter<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        let val: Value = v.into();
        if !is_value_none(&val) {
            self.filters.push((alias(col), val));
        }
        self
    }

    pub fn and_where<E: Into<SimpleExpr>>(mut self, cond: E) -> Self {
        self.conditions.push(cond.into());
        self
    }

    /// INNER JOIN `table` ON `condition`
    pub fn join<T: Iden, E: Into<SimpleExpr>>(mut self, table: T, condition: E) -> Self {
        self.joins.push((alias(table), condition.into()));
        self
    }

    pub fn order_by<C: Iden>(mut self, col: C, order: Order) -> Self {
        self.order_by.push((Expr::col(alias(col)).into(), order));
        self
    }

    pub fn order_by_expr<E: Into<SimpleExpr>>(mut self, expr: E, order: Order) -> Self {
        self.order_by.push((expr.into(), order));
        self
    }

    pub fn render(self) -> (String, sea_query::Values) {
        let mut query = Query::select();
        query.from(self.table);

        for (table, col) in self.columns {
            match table {
                Some(table) => query.column((table, col)),
                None => query.column(col),
            };
        }

        for (table, condition) in self.joins {
            query.inner_join(table, condition);
        }

        for (col, val) in self.filters {
            query.and_where(Expr::col(col).eq(val));
        }

        for cond in self.conditions {
            query.and_where(cond);
        }

        for (expr, order) in self.order_by {
            query.order_by_expr(expr, order);
        }

        query.build(PostgresQueryBuilder)
    }
}

// --- UPDATE ---

pub struct FluentUpdate {
    table: Alias,
    values: Vec<(Alias, Value)>,
    filters: Vec<(Alias, Value)>,
    returning: Vec<Alias>,
}

impl FluentUpdate {
    pub fn table<T: Iden>(table: T) -> Self {
        Self {
            table: alias(table),
            values: vec![],
            filters: vec![],
            returning: vec![],
        }
    }

    pub fn value<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        // Skip setting a field if value is None
        let val: Value = v.into();
        if !is_value_none(&val) {
            self.values.push((alias(col), val));
        }
        self
    }

    pub fn filter<C: Iden, V: Into<Value>>(mut self, col: C, v: V) -> Self {
        let val: Value = v.into();
        if !is_value_none(&val) {
            self.filters.push((alias(col), val));
        }
        self
    }

    pub fn returning<C: Iden>(mut self, col: C) -> Self {
        self.returning.push(alias(col));
        self
    }

    pub fn render(self) -> (String, sea_query::Values) {
        let mut query = Query::update();
        query.table(self.table);

        query.values(
            self.values
                .into_iter()
                .map(|(col, val)| (col, SimpleExpr::Value(val))),
        );

        for (col, val) in self.filters {
            query.and_where(Expr::col(col).eq(val));
        }

        if !self.returning.is_empty() {
            query.returning(Query::returning().columns(self.returning));
        }

        query.build(PostgresQueryBuilder)
    }
}

// --- DELETE ---

pub struct FluentDelete {
    table: Alias,
    in_filters: Vec<(Alias, Vec<Value>)>,
    returning: Vec<Alias>,
}

impl FluentDelete {
    pub fn from<T: Iden>(table: T) -> Self {
        Self {
            table: alias(table),
            in_filters: vec![],
            returning: vec![],
        }
    }

    /// `col IN (values...)`
    pub fn filter_in<C, V, I>(mut self, col: C, values: I) -> Self
    where
        C: Iden,
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.in_filters.push((alias(col), values));
        self
    }

    pub fn returning<C: Iden>(mut self, col: C) -> Self {
        self.returning.push(alias(col));
        self
    }

    pub fn render(self) -> (String, sea_query::Values) {
        let mut query = Query::delete();
        query.from_table(self.table);

        for (col, vals) in self.in_filters {
            query.and_where(Expr::col(col).is_in(vals));
        }

        if !self.returning.is_empty() {
            query.returning(Query::returning().columns(self.returning));
        }

        query.build(PostgresQueryBuilder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalayer::CRUD::types::{Cars, Countries, Universities, UserUniversities};

    #[test]
    fn test_fluent_insert_car() {
        let (sql, values) = FluentInsert::into(Cars::Table)
            .value(Cars::CarName, "Toyota")
            .returning(Cars::CarId)
            .returning(Cars::CarName)
            .render()
            .unwrap();

        assert_eq!(
            sql,
            r#"INSERT INTO "car" ("car_name") VALUES ($1) RETURNING "car_id", "car_name""#
        );
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn test_fluent_insert_skips_none() {
        let (sql, _) = FluentInsert::into(Countries::Table)
            .value(Countries::CountryName, "Japan")
            .value(Countries::CountryCode, Option::<String>::None)
            .render()
            .unwrap();

        assert!(sql.contains("\"country_name\""));
        assert!(!sql.contains("\"country_code\""));
    }

    #[test]
    fn test_fluent_select_by_id() {
        let (sql, values) = FluentSelect::from(Cars::Table)
            .column(Cars::CarId)
            .column(Cars::CarName)
            .filter(Cars::CarId, 7)
            .order_by(Cars::CarId, Order::Asc)
            .render();

        assert_eq!(
            sql,
            r#"SELECT "car_id", "car_name" FROM "car" WHERE "car_id" = $1 ORDER BY "car_id" ASC"#
        );
        assert_eq!(values.0, vec![Value::Int(Some(7))]);
    }

    #[test]
    fn test_fluent_select_join_user_universities() {
        let (sql, _) = FluentSelect::from(Universities::Table)
            .qualified_column(Universities::Table, Universities::UniversityId)
            .qualified_column(Universities::Table, Universities::UniversityName)
            .join(
                UserUniversities::Table,
                Expr::col((UserUniversities::Table, UserUniversities::UniversityId))
                    .equals((Universities::Table, Universities::UniversityId)),
            )
            .and_where(Expr::col((UserUniversities::Table, UserUniversities::UserId)).eq(3))
            .order_by_expr(
                Expr::col((Universities::Table, Universities::UniversityId)),
                Order::Asc,
            )
            .render();

        assert!(sql.starts_with(
            r#"SELECT "university"."university_id", "university"."university_name" FROM "university""#
        ));
        assert!(sql.contains(
            r#"INNER JOIN "user_university" ON "user_university"."university_id" = "university"."university_id""#
        ));
        assert!(sql.contains(r#"WHERE "user_university"."user_id" = $1"#));
        assert!(sql.ends_with(r#"ORDER BY "university"."university_id" ASC"#));
    }

    #[test]
    fn test_fluent_update_country() {
        let (sql, values) = FluentUpdate::table(Countries::Table)
            .value(Countries::CountryName, "France")
            .value(Countries::CountryCode, "FR")
            .filter(Countries::CountryId, 4)
            .returning(Countries::CountryId)
            .render();

        assert!(sql.starts_with(
            r#"UPDATE "country" SET "country_name" = $1, "country_code" = $2"#
        ));
        assert!(sql.contains(r#"WHERE "country_id" = $3"#));
        assert!(sql.ends_with(r#"RETURNING "country_id""#));
        assert_eq!(values.0.len(), 3);
    }

    #[test]
    fn test_fluent_delete_single_and_many() {
        let (sql, _) = FluentDelete::from(Cars::Table)
            .filter_in(Cars::CarId, [5])
            .returning(Cars::CarId)
            .render();
        assert_eq!(sql, r#"DELETE FROM "car" WHERE "car_id" IN ($1) RETURNING "car_id""#);

        let (sql, values) = FluentDelete::from(Cars::Table)
            .filter_in(Cars::CarId, [5, 6, 7])
            .render();
        assert_eq!(sql, r#"DELETE FROM "car" WHERE "car_id" IN ($1, $2, $3)"#);
        assert_eq!(values.0.len(), 3);
    }
}
