//! Pagination descriptor and paged result sets.

use serde::{Deserialize, Serialize};

/// Pagination metadata as the backend reports it alongside list responses.
///
/// Wire format (camelCase):
/// `{ "page": 2, "limit": 10, "total": 25, "totalPages": 3, "hasNext": true, "hasPrev": true }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    /// Metadata for a result set that was returned whole, without paging.
    ///
    /// Used when a list endpoint omits `meta`.
    pub fn single_page(len: usize) -> Self {
        Self {
            page: 1,
            limit: len.max(1) as u32,
            total: len as u64,
            total_pages: if len == 0 { 0 } else { 1 },
            has_next: false,
            has_prev: false,
        }
    }
}

/// One page of a remote result set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::single_page(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_deserializes_camel_case() {
        let json = r#"{"page":2,"limit":10,"total":25,"totalPages":3,"hasNext":true,"hasPrev":true}"#;
        let meta: PageMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_single_page_of_empty_set_has_zero_pages() {
        let meta = PageMeta::single_page(0);
        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }
}
