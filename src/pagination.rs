//! Pagination utilities for Pelican API responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pagination descriptor from a list envelope's `meta.pagination`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of records across all pages.
    pub total: u64,
    /// Number of records on this page.
    pub count: u32,
    /// Page size used by the panel.
    pub per_page: u32,
    /// Current page number (1-indexed).
    pub current_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Relation name (`next`, `previous`) to link URL.
    ///
    /// The panel sends `[]` instead of `{}` when there are no links.
    #[serde(default, deserialize_with = "links_or_empty")]
    pub links: HashMap<String, String>,
}

impl PaginationMeta {
    /// Whether the descriptor says more pages follow this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

fn links_or_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Links {
        Map(HashMap<String, String>),
        Empty(Vec<serde::de::IgnoredAny>),
    }

    Ok(match Links::deserialize(deserializer)? {
        Links::Map(map) => map,
        Links::Empty(_) => HashMap::new(),
    })
}

/// A page of results from the Pelican API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in panel order.
    pub items: Vec<T>,
    /// Pagination descriptor reported with this page.
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, pagination: PaginationMeta) -> Self {
        Self { items, pagination }
    }

    /// Current page number (1-indexed).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.pagination.current_page
    }

    /// Total number of pages reported by the panel.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }

    /// Whether there are more pages after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u32, total_pages: u32) -> PaginationMeta {
        PaginationMeta {
            total: 0,
            count: 0,
            per_page: 50,
            current_page,
            total_pages,
            links: HashMap::new(),
        }
    }

    #[test]
    fn test_page_has_more() {
        assert!(Page::new(vec![1, 2], meta(1, 3)).has_more());
        assert!(!Page::new(vec![1], meta(3, 3)).has_more());
        // Empty collection: the panel reports total_pages = 0 or 1
        assert!(!Page::<i32>::new(vec![], meta(1, 0)).has_more());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], meta(1, 1));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.page(), 1);
    }

    #[test]
    fn test_links_accept_map_or_empty_array() {
        let with_links: PaginationMeta = serde_json::from_value(serde_json::json!({
            "total": 60, "count": 50, "per_page": 50, "current_page": 1, "total_pages": 2,
            "links": {"next": "https://panel.local/api/application/users?page=2"}
        }))
        .unwrap();
        assert_eq!(
            with_links.links.get("next").map(String::as_str),
            Some("https://panel.local/api/application/users?page=2")
        );

        let without_links: PaginationMeta = serde_json::from_value(serde_json::json!({
            "total": 1, "count": 1, "per_page": 50, "current_page": 1, "total_pages": 1,
            "links": []
        }))
        .unwrap();
        assert!(without_links.links.is_empty());
    }

    #[test]
    fn test_pagination_params_skip_unset() {
        let params = PaginationParams::default();
        assert_eq!(serde_json::to_value(&params).unwrap(), serde_json::json!({}));

        let params = PaginationParams::for_page(2, 25);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"page": 2, "per_page": 25})
        );
    }
}
