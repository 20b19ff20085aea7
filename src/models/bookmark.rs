//! Bookmark categories, collections and sort orders.

use serde::{Deserialize, Serialize};

use super::common::nullable;

/// One of the five user-curated list types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkKind {
    Watching,
    Planned,
    Completed,
    OnHold,
    Dropped,
}

impl BookmarkKind {
    /// Get the numeric list type used in API paths.
    pub fn code(&self) -> u8 {
        match self {
            BookmarkKind::Watching => 1,
            BookmarkKind::Planned => 2,
            BookmarkKind::Completed => 3,
            BookmarkKind::OnHold => 4,
            BookmarkKind::Dropped => 5,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BookmarkKind::Watching => "Watching",
            BookmarkKind::Planned => "Planned",
            BookmarkKind::Completed => "Completed",
            BookmarkKind::OnHold => "On hold",
            BookmarkKind::Dropped => "Dropped",
        }
    }

    /// Get all categories in API order.
    pub fn all() -> &'static [BookmarkKind] {
        &[
            BookmarkKind::Watching,
            BookmarkKind::Planned,
            BookmarkKind::Completed,
            BookmarkKind::OnHold,
            BookmarkKind::Dropped,
        ]
    }
}

/// Sort order for bookmark, favorite and vote listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    NewestAdded,
    /// Oldest added first.
    OldestAdded,
}

impl SortOrder {
    /// Get the numeric sort code used in query strings.
    pub fn code(&self) -> u8 {
        match self {
            SortOrder::NewestAdded => 1,
            SortOrder::OldestAdded => 2,
        }
    }
}

/// A user collection of releases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,

    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Number of releases in the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_codes_are_distinct_and_ordered() {
        let codes: Vec<u8> = BookmarkKind::all().iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_order_default() {
        assert_eq!(SortOrder::default().code(), 1);
        assert_eq!(SortOrder::OldestAdded.code(), 2);
    }
}
