//! Contrato común de persistencia
//!
//! Cada recurso (users, vehicles, products) se guarda detrás de un
//! [`Store`]; la implementación concreta es Postgres o memoria según
//! `STORAGE_BACKEND`. Los controllers sólo conocen el trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow};

use crate::listing::{ListQuery, ListSchema, Listable, Page, Value};
use crate::utils::errors::AppResult;

/// Columnas y valores que escribe un `New*` o `*Changes`
pub trait Assignments {
    fn assignments(&self) -> Vec<(&'static str, Value)>;
}

/// Registro persistible con su esquema de listado
pub trait Resource:
    Listable + Clone + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    type New: Assignments + Send + Sync + 'static;
    type Changes: Assignments + Send + Sync + 'static;

    /// Nombre para mensajes de error ("User", "Vehicle", ...)
    const NAME: &'static str;

    /// Columnas con restricción UNIQUE en la tabla
    const UNIQUE: &'static [&'static str] = &[];

    fn schema() -> &'static ListSchema;

    /// Materializar un registro nuevo (backend en memoria)
    fn create(id: i64, new: Self::New, now: DateTime<Utc>) -> Self;

    /// Aplicar una actualización (backend en memoria)
    fn apply(&mut self, changes: Self::Changes, now: DateTime<Utc>);
}

#[async_trait]
pub trait Store<R: Resource>: Send + Sync {
    /// Página de registros según búsqueda, filtros y orden
    async fn list(&self, query: &ListQuery) -> AppResult<Page<R>>;

    /// Todos los registros que cumplen búsqueda y filtros, en orden, sin paginar
    async fn list_all(&self, query: &ListQuery) -> AppResult<Vec<R>>;

    /// Valores distintos no vacíos de una columna, ordenados
    async fn distinct(&self, column: &'static str) -> AppResult<Vec<String>>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_where(&self, column: &'static str, value: Value) -> AppResult<u64>;

    /// Cantidad de valores distintos no nulos de una columna
    async fn count_distinct(&self, column: &'static str) -> AppResult<u64>;

    async fn find(&self, id: i64) -> AppResult<Option<R>>;

    /// ¿Otro registro (distinto de `except`) tiene ya este valor?
    async fn exists(
        &self,
        column: &'static str,
        value: Value,
        except: Option<i64>,
    ) -> AppResult<bool>;

    async fn insert(&self, new: R::New) -> AppResult<R>;

    /// `None` si el registro no existe
    async fn update(&self, id: i64, changes: R::Changes) -> AppResult<Option<R>>;

    /// `false` si el registro no existe
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
