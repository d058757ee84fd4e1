//! Parámetros crudos de un listado
//!
//! Llegan como pares de query string (`search`, `sort`, `direction`,
//! `per_page`, `page` y `filters[columna][]`). Aquí sólo se recogen; la
//! validación vive en [`crate::listing::query`].

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub per_page: Option<String>,
    pub page: Option<String>,
    pub filters: Option<BTreeMap<String, Vec<String>>>,
}

impl ListParams {
    /// Construir a partir de los pares decodificados del query string
    ///
    /// Acepta `filters[col][]=v`, `filters[col][0]=v` y `filters[col]=v`.
    /// Las claves desconocidas se ignoran; para claves escalares repetidas
    /// gana la última.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = ListParams::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.into();
            match key {
                "search" => params.search = Some(value),
                "sort" => params.sort = Some(value),
                "direction" => params.direction = Some(value),
                "per_page" => params.per_page = Some(value),
                "page" => params.page = Some(value),
                _ => {
                    if let Some(column) = filter_column_of(key) {
                        params
                            .filters
                            .get_or_insert_with(BTreeMap::new)
                            .entry(column.to_string())
                            .or_default()
                            .push(value);
                    }
                }
            }
        }

        params
    }

    /// Los parámetros que el cliente envió, tal cual, para reconstruir la vista
    pub fn echo(&self) -> QueryParams {
        QueryParams {
            search: self.search.clone(),
            sort: self.sort.clone(),
            direction: self.direction.clone(),
            filters: self.filters.clone(),
            per_page: self.per_page.as_deref().and_then(|raw| raw.trim().parse().ok()),
        }
    }
}

fn filter_column_of(key: &str) -> Option<&str> {
    let rest = key.strip_prefix("filters[")?;
    let end = rest.find(']')?;
    let column = &rest[..end];
    let tail = &rest[end + 1..];
    let tail_ok = tail.is_empty()
        || (tail.starts_with('[')
            && tail.ends_with(']')
            && tail[1..tail.len() - 1].chars().all(|c| c.is_ascii_digit()));
    (!column.is_empty() && tail_ok).then_some(column)
}

/// Parámetros devueltos al cliente (`queryParams`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}
