//! Página de resultados con los metadatos del paginador

use serde::Serialize;

/// Una página del listado con la forma que espera la tabla del cliente
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl<T> Page<T> {
    /// Armar la página a partir de los registros ya recortados y el total
    pub fn new(data: Vec<T>, total: u64, page: u32, per_page: u32) -> Self {
        let per_page_wide = u64::from(per_page.max(1));
        let last_page = total.div_ceil(per_page_wide).max(1);
        let offset = u64::from(page.saturating_sub(1)) * per_page_wide;
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            (Some(offset + 1), Some(offset + data.len() as u64))
        };

        Self {
            data,
            current_page: page,
            last_page: u32::try_from(last_page).unwrap_or(u32::MAX),
            per_page,
            total,
            from,
            to,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
            from: self.from,
            to: self.to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_reports_item_range() {
        let page = Page::new(vec![11, 12, 13, 14, 15, 16, 17, 18, 19, 20], 42, 2, 10);
        assert_eq!(page.last_page, 5);
        assert_eq!(page.from, Some(11));
        assert_eq!(page.to, Some(20));
    }

    #[test]
    fn last_partial_page() {
        let page = Page::new(vec![41, 42], 42, 5, 10);
        assert_eq!(page.from, Some(41));
        assert_eq!(page.to, Some(42));
    }

    #[test]
    fn empty_result_has_one_page_and_null_range() {
        let page: Page<i32> = Page::new(Vec::new(), 0, 1, 10);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.from, None);
        assert_eq!(page.to, None);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page: Page<i32> = Page::new(Vec::new(), 3, 7, 10);
        assert_eq!(page.current_page, 7);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.total, 3);
        assert!(page.from.is_none() && page.to.is_none());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 2, 1, 10).map(|n| n * 10);
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.total, 2);
    }
}
