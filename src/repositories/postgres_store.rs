//! Backend Postgres del [`Store`]
//!
//! Los nombres de tabla y columna salen siempre del [`ListSchema`] del
//! recurso; los valores viajan enlazados con `QueryBuilder`.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::listing::{sql, ListQuery, ListSchema, Listable, Page, Value};
use crate::repositories::store::{Assignments, Resource, Store};
use crate::utils::errors::{map_db_error, AppError, AppResult};

pub struct PgStore<R> {
    pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> PgStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }

    fn column(column: &'static str) -> AppResult<&'static str> {
        if R::schema().knows_column(column) {
            Ok(column)
        } else {
            Err(AppError::Internal(format!(
                "Column '{}' is not part of the {} schema",
                column,
                R::schema().table
            )))
        }
    }
}

fn to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

fn push_equals(builder: &mut QueryBuilder<'_, Postgres>, column: &str, value: &Value) {
    if value.is_null() {
        builder.push(format!("{} IS NULL", column));
    } else {
        builder.push(format!("{} = ", column));
        sql::push_value(builder, value);
    }
}

/// `INSERT ... RETURNING *` con marcas de tiempo del servidor
pub fn insert_query(schema: &ListSchema, values: &impl Assignments) -> QueryBuilder<'static, Postgres> {
    let assignments = values.assignments();
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} (", schema.table));
    for (column, _) in &assignments {
        builder.push(*column);
        builder.push(", ");
    }
    builder.push("created_at, updated_at) VALUES (");
    for (_, value) in &assignments {
        sql::push_value(&mut builder, value);
        builder.push(", ");
    }
    builder.push("NOW(), NOW()) RETURNING *");
    builder
}

/// `UPDATE ... RETURNING *`; `updated_at` siempre se renueva
pub fn update_query(
    schema: &ListSchema,
    id: i64,
    changes: &impl Assignments,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", schema.table));
    for (column, value) in changes.assignments() {
        builder.push(format!("{} = ", column));
        sql::push_value(&mut builder, &value);
        builder.push(", ");
    }
    builder.push(format!("updated_at = NOW() WHERE {} = ", schema.primary_key));
    builder.push_bind(id);
    builder.push(" RETURNING *");
    builder
}

#[async_trait]
impl<R: Resource> Store<R> for PgStore<R> {
    async fn list(&self, query: &ListQuery) -> AppResult<Page<R>> {
        let mut count = sql::count_query(query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut page = sql::page_query(query);
        let rows: Vec<R> = page
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        tracing::debug!(
            "📄 {} page {} -> {} of {} rows",
            R::schema().table,
            query.page,
            rows.len(),
            total
        );
        Ok(Page::new(rows, to_u64(total), query.page, query.per_page))
    }

    async fn list_all(&self, query: &ListQuery) -> AppResult<Vec<R>> {
        let mut builder = sql::all_query(query);
        builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn distinct(&self, column: &'static str) -> AppResult<Vec<String>> {
        let column = Self::column(column)?;
        let statement = format!(
            "SELECT DISTINCT CAST({c} AS TEXT) FROM {t} \
             WHERE {c} IS NOT NULL AND CAST({c} AS TEXT) <> '' ORDER BY 1",
            c = column,
            t = R::schema().table
        );
        sqlx::query_scalar::<_, String>(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn count(&self) -> AppResult<u64> {
        let statement = format!("SELECT COUNT(*) FROM {}", R::schema().table);
        let total: i64 = sqlx::query_scalar(&statement)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(to_u64(total))
    }

    async fn count_where(&self, column: &'static str, value: Value) -> AppResult<u64> {
        let column = Self::column(column)?;
        let mut builder =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE ", R::schema().table));
        push_equals(&mut builder, column, &value);
        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(to_u64(total))
    }

    async fn count_distinct(&self, column: &'static str) -> AppResult<u64> {
        let column = Self::column(column)?;
        let statement = format!("SELECT COUNT(DISTINCT {}) FROM {}", column, R::schema().table);
        let total: i64 = sqlx::query_scalar(&statement)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(to_u64(total))
    }

    async fn find(&self, id: i64) -> AppResult<Option<R>> {
        let schema = R::schema();
        let statement = format!("SELECT * FROM {} WHERE {} = $1", schema.table, schema.primary_key);
        sqlx::query_as::<_, R>(&statement)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn exists(
        &self,
        column: &'static str,
        value: Value,
        except: Option<i64>,
    ) -> AppResult<bool> {
        let column = Self::column(column)?;
        let schema = R::schema();
        let mut builder =
            QueryBuilder::new(format!("SELECT EXISTS(SELECT 1 FROM {} WHERE ", schema.table));
        push_equals(&mut builder, column, &value);
        if let Some(id) = except {
            builder.push(format!(" AND {} <> ", schema.primary_key));
            builder.push_bind(id);
        }
        builder.push(")");
        builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn insert(&self, new: R::New) -> AppResult<R> {
        let mut builder = insert_query(R::schema(), &new);
        let record: R = builder
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        tracing::info!("✅ {} {} created", R::NAME, Listable::id(&record));
        Ok(record)
    }

    async fn update(&self, id: i64, changes: R::Changes) -> AppResult<Option<R>> {
        let mut builder = update_query(R::schema(), id, &changes);
        builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let schema = R::schema();
        let statement = format!("DELETE FROM {} WHERE {} = $1", schema.table, schema.primary_key);
        let result = sqlx::query(&statement)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewVehicle, VEHICLE_SCHEMA};

    fn corolla() -> NewVehicle {
        NewVehicle {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            color: "White".to_string(),
            registration_number: "DHA-1234".to_string(),
            vendor: None,
            is_active: true,
        }
    }

    #[test]
    fn insert_binds_every_writable_column() {
        assert_eq!(
            insert_query(&VEHICLE_SCHEMA, &corolla()).sql(),
            "INSERT INTO vehicles (brand, model, color, registration_number, vendor, is_active, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, NULL, $5, NOW(), NOW()) RETURNING *"
        );
    }

    #[test]
    fn update_touches_updated_at_and_targets_the_id() {
        assert_eq!(
            update_query(&VEHICLE_SCHEMA, 7, &corolla()).sql(),
            "UPDATE vehicles SET brand = $1, model = $2, color = $3, registration_number = $4, \
             vendor = NULL, is_active = $5, updated_at = NOW() WHERE id = $6 RETURNING *"
        );
    }
}
