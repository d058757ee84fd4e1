//! Compilación de un [`ListQuery`] a SQL de Postgres
//!
//! Los identificadores provienen del [`ListSchema`] estático; todo valor
//! del cliente viaja como parámetro enlazado.

use sqlx::{Postgres, QueryBuilder};

use crate::listing::{query::ListQuery, value::Value};

/// Escapar comodines de LIKE para que la búsqueda sea literal
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 2);
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Enlazar un [`Value`] como parámetro
pub fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &Value) {
    match value {
        Value::Null => {
            builder.push("NULL");
        }
        Value::Text(s) => {
            builder.push_bind(s.clone());
        }
        Value::Bool(b) => {
            builder.push_bind(*b);
        }
        Value::Int(i) => {
            builder.push_bind(*i);
        }
        Value::Decimal(d) => {
            builder.push_bind(*d);
        }
        Value::Timestamp(t) => {
            builder.push_bind(*t);
        }
    }
}

/// Escribir `WHERE ...` con búsqueda y filtros (nada si no hay condiciones)
pub fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    let mut first = true;

    if let Some(search) = &query.search {
        push_clause_start(builder, &mut first);
        let pattern = format!("%{}%", escape_like(search));
        builder.push("(");
        for (i, column) in query.schema.searchable.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(format!("CAST({} AS TEXT) ILIKE ", column));
            builder.push_bind(pattern.clone());
        }
        builder.push(")");
    }

    for filter in &query.filters {
        push_clause_start(builder, &mut first);
        builder.push(format!("{} IN (", filter.column));
        for (i, value) in filter.values.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(builder, value);
        }
        builder.push(")");
    }
}

fn push_clause_start(builder: &mut QueryBuilder<'_, Postgres>, first: &mut bool) {
    builder.push(if *first { " WHERE " } else { " AND " });
    *first = false;
}

/// `SELECT COUNT(*)` de las filas que cumplen la consulta
pub fn count_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", query.schema.table));
    push_conditions(&mut builder, query);
    builder
}

/// `SELECT *` de todas las filas que cumplen la consulta, sin paginar
pub fn all_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let schema = query.schema;
    let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", schema.table));
    push_conditions(&mut builder, query);

    builder.push(format!(" ORDER BY {} {}", query.sort, query.direction.as_sql()));
    if query.sort != schema.primary_key {
        builder.push(format!(", {} ASC", schema.primary_key));
    }
    builder
}

/// `SELECT *` de la página pedida, con desempate por clave primaria
pub fn page_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = all_query(query);
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(query.per_page));
    builder.push(" OFFSET ");
    builder.push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));
    builder
}
