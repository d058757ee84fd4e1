//! Evaluación en memoria de un [`ListQuery`]
//!
//! Mismas reglas que el SQL generado en [`crate::listing::sql`]: búsqueda
//! por subcadena sin distinguir mayúsculas, filtros por pertenencia, orden
//! estable con desempate por clave primaria ascendente.

use std::cmp::Ordering;

use crate::listing::{page::Page, query::ListQuery, schema::SortDirection, Listable};

/// ¿Cumple el registro la búsqueda y los filtros de la consulta?
pub fn matches<R: Listable>(record: &R, query: &ListQuery) -> bool {
    let search_ok = match &query.search {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            query.schema.searchable.iter().any(|column| {
                record
                    .value(column)
                    .as_search_text()
                    .map_or(false, |text| text.to_lowercase().contains(&needle))
            })
        }
    };

    search_ok
        && query
            .filters
            .iter()
            .all(|filter| filter.values.contains(&record.value(filter.column)))
}

/// Comparador del orden pedido, con desempate por id ascendente
pub fn compare<R: Listable>(a: &R, b: &R, query: &ListQuery) -> Ordering {
    let primary = a.value(query.sort).sort_cmp(&b.value(query.sort));
    let primary = match query.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id().cmp(&b.id()))
}

/// Registros que cumplen la consulta, ya ordenados
pub fn select<'a, R: Listable>(records: &'a [R], query: &ListQuery) -> Vec<&'a R> {
    let mut matching: Vec<&R> = records.iter().filter(|r| matches(*r, query)).collect();
    matching.sort_by(|a, b| compare(*a, *b, query));
    matching
}

/// Filtrar, ordenar y paginar una colección completa
pub fn paginate<R: Listable + Clone>(records: &[R], query: &ListQuery) -> Page<R> {
    let matching = select(records, query);

    let total = matching.len() as u64;
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let data = matching
        .into_iter()
        .skip(offset)
        .take(query.per_page as usize)
        .cloned()
        .collect();

    Page::new(data, total, query.page, query.per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{
        params::ListParams,
        schema::{FilterColumn, FilterKind, ListSchema},
        value::Value,
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: i64,
        name: &'static str,
        status: &'static str,
        city: Option<&'static str>,
    }

    impl Listable for Person {
        fn id(&self) -> i64 {
            self.id
        }

        fn value(&self, column: &str) -> Value {
            match column {
                "id" => Value::Int(self.id),
                "name" => Value::from(self.name),
                "status" => Value::from(self.status),
                "city" => Value::from(self.city),
                _ => Value::Null,
            }
        }
    }

    static SCHEMA: ListSchema = ListSchema {
        table: "people",
        primary_key: "id",
        searchable: &["name", "city"],
        sortable: &["id", "name", "city", "status"],
        filterable: &[
            FilterColumn { name: "status", kind: FilterKind::OneOf(&["active", "inactive", "suspended"]) },
            FilterColumn { name: "city", kind: FilterKind::Text },
        ],
        default_sort: "id",
        default_direction: SortDirection::Asc,
        default_per_page: 10,
        max_per_page: 100,
    };

    fn people() -> Vec<Person> {
        vec![
            Person { id: 1, name: "Ada Lovelace", status: "active", city: Some("London") },
            Person { id: 2, name: "Grace Hopper", status: "active", city: None },
            Person { id: 3, name: "Alan Turing", status: "suspended", city: Some("London") },
            Person { id: 4, name: "Barbara Liskov", status: "inactive", city: Some("Boston") },
            Person { id: 5, name: "Ada Yonath", status: "active", city: Some("Rehovot") },
        ]
    }

    fn run(pairs: &[(&str, &str)]) -> Page<Person> {
        let params = ListParams::from_pairs(pairs.iter().copied());
        let query = ListQuery::from_params(&SCHEMA, &params).unwrap();
        paginate(&people(), &query)
    }

    fn ids(page: &Page<Person>) -> Vec<i64> {
        page.data.iter().map(|p| p.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_and_spans_columns() {
        assert_eq!(ids(&run(&[("search", "ADA")])), vec![1, 5]);
        assert_eq!(ids(&run(&[("search", "lond")])), vec![1, 3]);
    }

    #[test]
    fn select_returns_every_match_regardless_of_page() {
        let params = ListParams::from_pairs(vec![
            ("filters[city][]", "London"),
            ("sort", "name"),
            ("per_page", "1"),
            ("page", "2"),
        ]);
        let query = ListQuery::from_params(&SCHEMA, &params).unwrap();
        let records = people();
        let ids: Vec<i64> = select(&records, &query).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn status_filter_restricts_every_row() {
        let page = run(&[("filters[status][]", "active")]);
        assert_eq!(page.total, 3);
        assert!(page.data.iter().all(|p| p.status == "active"));
    }

    #[test]
    fn two_filters_intersect() {
        let both = ids(&run(&[("filters[status][]", "active"), ("filters[city][]", "London")]));
        let status: Vec<i64> = ids(&run(&[("filters[status][]", "active")]));
        let city: Vec<i64> = ids(&run(&[("filters[city][]", "London")]));
        let intersection: Vec<i64> = status.into_iter().filter(|id| city.contains(id)).collect();
        assert_eq!(both, intersection);
        assert_eq!(both, vec![1]);
    }

    #[test]
    fn membership_within_one_filter() {
        let page = run(&[("filters[status][]", "inactive"), ("filters[status][]", "suspended")]);
        assert_eq!(ids(&page), vec![3, 4]);
    }

    #[test]
    fn descending_reverses_distinct_values_and_ties_break_by_id() {
        let asc = ids(&run(&[("sort", "name"), ("direction", "asc")]));
        let desc = ids(&run(&[("sort", "name"), ("direction", "desc")]));
        assert_eq!(asc, vec![1, 5, 3, 4, 2]);
        assert_eq!(desc, vec![2, 4, 3, 5, 1]);

        let by_status = ids(&run(&[("sort", "status"), ("direction", "desc")]));
        assert_eq!(by_status, vec![3, 4, 1, 2, 5]);
    }

    #[test]
    fn nulls_sort_last_ascending_and_first_descending() {
        assert_eq!(ids(&run(&[("sort", "city"), ("direction", "asc")])).last(), Some(&2));
        assert_eq!(ids(&run(&[("sort", "city"), ("direction", "desc")])).first(), Some(&2));
    }

    #[test]
    fn page_size_bounds_the_page_and_total_counts_matches() {
        let page = run(&[("per_page", "2"), ("page", "2")]);
        assert_eq!(ids(&page), vec![3, 4]);
        assert_eq!(page.total, 5);
        assert_eq!(page.last_page, 3);
        assert_eq!((page.from, page.to), (Some(3), Some(4)));
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = run(&[("per_page", "2"), ("page", "9")]);
        assert!(page.data.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.from, None);
    }
}
