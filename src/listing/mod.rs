//! Motor de listados
//!
//! Búsqueda, filtros, orden y paginación comunes a todos los índices del
//! panel. Cada recurso aporta un [`schema::ListSchema`] estático con sus
//! listas blancas; los parámetros del cliente se validan en
//! [`query::ListQuery::from_params`] y luego se ejecutan en SQL
//! ([`sql`]) o en memoria ([`memory`]) con la misma semántica.

pub mod memory;
pub mod page;
pub mod params;
pub mod query;
pub mod schema;
pub mod sql;
pub mod value;

pub use page::Page;
pub use params::{ListParams, QueryParams};
pub use query::{Filter, ListQuery};
pub use schema::{FilterColumn, FilterKind, ListSchema, SortDirection};
pub use value::Value;

/// Registro que puede listarse: expone su id y el valor de cada columna
pub trait Listable {
    fn id(&self) -> i64;

    /// Valor de una columna por nombre; `Value::Null` si no existe
    fn value(&self, column: &str) -> Value;
}
