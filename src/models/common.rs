//! Common types shared across all models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of a paginated Anixart listing.
///
/// Newer endpoints answer with `content`/`total_count`, older ones with
/// `items`/`total`; both shapes deserialize into this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Entries on this page.
    #[serde(default = "Vec::new", alias = "items", deserialize_with = "nullable")]
    pub content: Vec<T>,

    /// Total number of entries across all pages.
    #[serde(default, alias = "total", deserialize_with = "nullable")]
    pub total_count: u64,

    /// Number of pages, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_page_count: Option<u64>,

    /// Index of this page (0-based).
    #[serde(default, alias = "page", skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_count: 0,
            total_page_count: None,
            current_page: None,
        }
    }
}

impl<T> Page<T> {
    /// Number of pages to walk, given the page size the API uses.
    ///
    /// Prefers the reported page count and falls back to
    /// `ceil(total_count / page_size)`.
    pub fn page_count(&self, page_size: u64) -> u64 {
        match self.total_page_count {
            Some(n) => n,
            None if page_size == 0 => 0,
            None => self.total_count.div_ceil(page_size),
        }
    }

    /// Check whether the page has no entries.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Deserialize `null` as the type's default value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a field that the API sends either as a string or a number.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_content_shape() {
        let page: Page<u32> = serde_json::from_value(json!({
            "code": 0,
            "content": [1, 2, 3],
            "total_count": 53,
            "total_page_count": 3,
            "current_page": 0
        }))
        .unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_count, 53);
        assert_eq!(page.page_count(25), 3);
    }

    #[test]
    fn test_page_items_shape() {
        let page: Page<u32> = serde_json::from_value(json!({
            "items": [7],
            "total": 26
        }))
        .unwrap();
        assert_eq!(page.content, vec![7]);
        assert_eq!(page.page_count(25), 2);
    }

    #[test]
    fn test_page_null_content() {
        let page: Page<u32> = serde_json::from_value(json!({ "content": null })).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.page_count(25), 0);
    }

    #[test]
    fn test_lenient_string() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "lenient_string")]
            year: Option<String>,
        }

        let row: Row = serde_json::from_value(json!({ "year": 2024 })).unwrap();
        assert_eq!(row.year.as_deref(), Some("2024"));
        let row: Row = serde_json::from_value(json!({ "year": "2019" })).unwrap();
        assert_eq!(row.year.as_deref(), Some("2019"));
        let row: Row = serde_json::from_value(json!({ "year": "" })).unwrap();
        assert_eq!(row.year, None);
        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.year, None);
    }
}
