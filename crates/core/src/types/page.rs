//! Pagination and filtering for list endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Query parameters for a `get-all-*` list endpoint.
///
/// The backend treats filtering and paging as alternatives: a filtered
/// request carries only `filter` (a JSON object encoded as a string), an
/// unfiltered one carries only `page` and `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Field filters, e.g. `{"phone": "98765"}` or `{"status": "Pending"}`.
    pub filter: Map<String, Value>,
}

impl ListQuery {
    /// An unpaged, unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A query for one page.
    #[must_use]
    pub fn paged(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            filter: Map::new(),
        }
    }

    /// Add a filter field.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }

    /// Whether any filter field is set.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }

    /// Query pairs for a list endpoint: `filter` when filtered, otherwise
    /// `page`/`limit`.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        if self.is_filtered() {
            vec![("filter".to_owned(), self.filter_json())]
        } else {
            self.paging_pairs()
        }
    }

    /// Query pairs that always include `page`/`limit` and add `filter` when
    /// set. Used by nested lists such as a user's trips.
    #[must_use]
    pub fn to_pairs_with_paging(&self) -> Vec<(String, String)> {
        let mut pairs = self.paging_pairs();
        if self.is_filtered() {
            pairs.push(("filter".to_owned(), self.filter_json()));
        }
        pairs
    }

    fn paging_pairs(&self) -> Vec<(String, String)> {
        // Zero is never a valid page or limit; the backend treats it as unset.
        [("page", self.page), ("limit", self.limit)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .filter(|v| *v > 0)
                    .map(|v| (key.to_owned(), v.to_string()))
            })
            .collect()
    }

    fn filter_json(&self) -> String {
        Value::Object(self.filter.clone()).to_string()
    }
}

/// One page of records from a list endpoint.
///
/// Accepts both `{"data": [...], "totalPages": n}` and a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Total number of pages (at least 1).
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// Whether a page after `current` exists.
    #[must_use]
    pub const fn has_next(&self, current: u32) -> bool {
        current < self.total_pages
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaginatedRepr<T> {
    Paged {
        data: Vec<T>,
        #[serde(rename = "totalPages", default)]
        total_pages: Option<u32>,
    },
    Bare(Vec<T>),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Paginated<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (items, total_pages) = match PaginatedRepr::deserialize(deserializer)? {
            PaginatedRepr::Paged { data, total_pages } => (data, total_pages.unwrap_or(1)),
            PaginatedRepr::Bare(items) => (items, 1),
        };
        Ok(Self {
            items,
            total_pages: total_pages.max(1),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_unfiltered_sends_page_and_limit() {
        let query = ListQuery::paged(2, 10);
        assert_eq!(query.to_pairs(), pairs(&[("page", "2"), ("limit", "10")]));
    }

    #[test]
    fn test_filtered_sends_only_filter() {
        let query = ListQuery::paged(2, 10).filter("phone", "98765");
        assert_eq!(
            query.to_pairs(),
            pairs(&[("filter", r#"{"phone":"98765"}"#)])
        );
    }

    #[test]
    fn test_empty_query_sends_nothing() {
        assert!(ListQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn test_zero_page_is_skipped() {
        let query = ListQuery::paged(0, 5);
        assert_eq!(query.to_pairs(), pairs(&[("limit", "5")]));
    }

    #[test]
    fn test_with_paging_keeps_page_and_filter() {
        let query = ListQuery::paged(1, 5).filter("status", "Completed");
        assert_eq!(
            query.to_pairs_with_paging(),
            pairs(&[
                ("page", "1"),
                ("limit", "5"),
                ("filter", r#"{"status":"Completed"}"#)
            ])
        );
    }

    #[test]
    fn test_paginated_object() {
        let page: Paginated<u32> =
            serde_json::from_value(json!({"data": [1, 2], "totalPages": 4})).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total_pages, 4);
        assert!(page.has_next(3));
        assert!(!page.has_next(4));
    }

    #[test]
    fn test_paginated_bare_array() {
        let page: Paginated<u32> = serde_json::from_value(json!([7])).unwrap();
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_paginated_zero_pages_reads_as_one() {
        let page: Paginated<u32> =
            serde_json::from_value(json!({"data": [], "totalPages": 0})).unwrap();
        assert_eq!(page.total_pages, 1);
    }
}
