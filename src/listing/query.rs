//! Validación de parámetros de listado
//!
//! Convierte [`ListParams`] en un [`ListQuery`] contra el esquema del
//! recurso. Todo lo que el motor recibe ya pasó por aquí: columnas de orden
//! fuera de la lista blanca, direcciones desconocidas, `per_page` fuera de
//! rango o filtros mal formados se rechazan con errores por campo.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::listing::{
    params::ListParams,
    schema::{FilterKind, ListSchema, SortDirection},
    value::Value,
};
use crate::utils::validation::{parse_bool_flag, parse_bounded_u32};

pub const MAX_SEARCH_LENGTH: usize = 255;

/// Filtro de inclusión ya tipado
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub values: Vec<Value>,
}

/// Consulta de listado validada
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub schema: &'static ListSchema,
    pub search: Option<String>,
    pub filters: Vec<Filter>,
    pub sort: &'static str,
    pub direction: SortDirection,
    pub per_page: u32,
    pub page: u32,
}

impl ListQuery {
    /// Validar los parámetros crudos contra el esquema
    pub fn from_params(
        schema: &'static ListSchema,
        params: &ListParams,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        // El echo conserva el texto tal cual; la búsqueda usa el recortado
        let search = match params.search.as_deref().map(str::trim) {
            Some(s) if s.chars().count() > MAX_SEARCH_LENGTH => {
                errors.add("search", invalid("max", format!(
                    "The search may not be greater than {} characters.",
                    MAX_SEARCH_LENGTH
                )));
                None
            }
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => None,
        };

        let sort = match params.sort.as_deref() {
            None => schema.default_sort,
            Some(raw) => schema.sort_column(raw).unwrap_or_else(|| {
                errors.add("sort", invalid("in", "The selected sort is invalid."));
                schema.default_sort
            }),
        };

        let direction = match params.direction.as_deref() {
            None => schema.default_direction,
            Some(raw) => SortDirection::from_param(raw).unwrap_or_else(|| {
                errors.add("direction", invalid("in", "The selected direction is invalid."));
                schema.default_direction
            }),
        };

        let per_page = match params.per_page.as_deref() {
            None => schema.default_per_page,
            Some(raw) => parse_bounded_u32(raw, 1, schema.max_per_page).unwrap_or_else(|e| {
                errors.add("per_page", e);
                schema.default_per_page
            }),
        };

        let page = match params.page.as_deref() {
            None => 1,
            Some(raw) => parse_bounded_u32(raw, 1, u32::MAX).unwrap_or_else(|e| {
                errors.add("page", e);
                1
            }),
        };

        let mut filters = Vec::new();
        for (name, raw_values) in params.filters.iter().flatten() {
            let Some(column) = schema.filter_column(name) else {
                errors.add("filters", invalid_with_column(
                    "unknown_filter",
                    format!("Filtering by '{}' is not allowed.", name),
                    name,
                ));
                continue;
            };

            let mut values = Vec::new();
            for raw in raw_values.iter().filter(|v| !v.is_empty()) {
                let value = match column.kind {
                    FilterKind::Text => Some(Value::Text(raw.clone())),
                    FilterKind::OneOf(domain) => {
                        domain.contains(&raw.as_str()).then(|| Value::Text(raw.clone()))
                    }
                    FilterKind::Boolean => parse_bool_flag(raw).map(Value::Bool),
                };
                match value {
                    Some(value) if !values.contains(&value) => values.push(value),
                    Some(_) => {}
                    None => errors.add("filters", invalid_with_column(
                        "in",
                        format!("The selected {} '{}' is invalid.", column.name, raw),
                        name,
                    )),
                }
            }

            if !values.is_empty() {
                filters.push(Filter { column: column.name, values });
            }
        }

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(Self {
            schema,
            search,
            filters,
            sort,
            direction,
            per_page,
            page,
        })
    }

    /// Añadir un filtro fijo del servidor, combinado con AND con los del cliente
    pub fn with_fixed_filter(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column,
            values: vec![value.into()],
        });
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

fn invalid(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message.into()));
    error
}

fn invalid_with_column(code: &'static str, message: String, column: &str) -> ValidationError {
    let mut error = invalid(code, message);
    error.add_param(Cow::Borrowed("column"), &column);
    error
}
