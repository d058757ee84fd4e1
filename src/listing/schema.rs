//! Esquema de listado por recurso
//!
//! Cada recurso declara qué columnas admiten búsqueda, orden y filtros.
//! Los nombres de columna sólo salen de estas listas estáticas, nunca del
//! request, así que pueden interpolarse en SQL sin riesgo.

use serde::{Deserialize, Serialize};

/// Dirección de orden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Tipo de los valores aceptados por un filtro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Texto libre (marcas, colores, categorías)
    Text,
    /// Texto restringido a un dominio cerrado
    OneOf(&'static [&'static str]),
    /// `true|false|1|0`
    Boolean,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterColumn {
    pub name: &'static str,
    pub kind: FilterKind,
}

#[derive(Debug)]
pub struct ListSchema {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub searchable: &'static [&'static str],
    pub sortable: &'static [&'static str],
    pub filterable: &'static [FilterColumn],
    pub default_sort: &'static str,
    pub default_direction: SortDirection,
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl ListSchema {
    pub fn filter_column(&self, name: &str) -> Option<&FilterColumn> {
        self.filterable.iter().find(|column| column.name == name)
    }

    pub fn sort_column(&self, name: &str) -> Option<&'static str> {
        self.sortable.iter().copied().find(|column| *column == name)
    }

    /// Columna conocida por el esquema en cualquiera de sus listas
    pub fn knows_column(&self, name: &str) -> bool {
        name == self.primary_key
            || self.searchable.contains(&name)
            || self.sortable.contains(&name)
            || self.filter_column(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: ListSchema = ListSchema {
        table: "things",
        primary_key: "id",
        searchable: &["name"],
        sortable: &["id", "name"],
        filterable: &[FilterColumn { name: "status", kind: FilterKind::OneOf(&["on", "off"]) }],
        default_sort: "id",
        default_direction: SortDirection::Asc,
        default_per_page: 10,
        max_per_page: 100,
    };

    #[test]
    fn direction_parses_lowercase_only() {
        assert_eq!(SortDirection::from_param("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_param("DESC"), None);
    }

    #[test]
    fn lookups_respect_whitelists() {
        assert_eq!(SCHEMA.sort_column("name"), Some("name"));
        assert_eq!(SCHEMA.sort_column("password"), None);
        assert!(SCHEMA.filter_column("status").is_some());
        assert!(SCHEMA.knows_column("status"));
        assert!(!SCHEMA.knows_column("password"));
    }
}
