//! Watch history and vote rows.

use serde::{Deserialize, Serialize};

use super::release::{Episode, Release};

/// A watch event from `/history`.
///
/// The API returns the release fields flattened into the row. Some older
/// responses also nest the full release under `release`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    /// Release fields carried by the row itself.
    #[serde(flatten)]
    pub row: Release,

    /// When the last episode was watched (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_view_timestamp: Option<i64>,

    /// The episode watched last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_view_episode: Option<Episode>,

    /// Whether the release is marked as viewed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_viewed: Option<bool>,

    /// Nested release, when the endpoint provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
}

impl HistoryItem {
    /// Release id, preferring the nested release. `None` when neither is set.
    pub fn release_id(&self) -> Option<i64> {
        self.release
            .as_ref()
            .map(|r| r.id)
            .filter(|id| *id != 0)
            .or(Some(self.row.id).filter(|id| *id != 0))
    }

    /// The release this row refers to: the nested one when present.
    pub fn release_view(&self) -> &Release {
        self.release.as_ref().unwrap_or(&self.row)
    }

    /// Timestamp used for ordering; absent counts as 0.
    pub fn timestamp(&self) -> i64 {
        self.last_view_timestamp.unwrap_or(0)
    }
}

/// A release the user rated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    /// Release fields carried by the row.
    #[serde(flatten)]
    pub release: Release,

    /// The user's grade, 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<u8>,

    /// When the grade was given (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted_at: Option<i64>,
}

impl Vote {
    /// Merge catalog details into the vote, keeping the vote's own title
    /// and image when it has them.
    pub fn enrich(&mut self, full: Release) {
        let title_ru = std::mem::take(&mut self.release.title_ru);
        let image = self.release.image.take();
        let poster = self.release.poster.take();

        self.release = full;
        if !title_ru.trim().is_empty() {
            self.release.title_ru = title_ru;
        }
        if image.is_some() {
            self.release.image = image;
        }
        if self.release.poster.is_none() {
            self.release.poster = poster;
        }
    }
}

/// Most recent watch, with the release resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LastWatched {
    /// The release watched.
    pub release: Release,

    /// When it was watched (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_view_timestamp: Option<i64>,

    /// The episode watched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_view_episode: Option<Episode>,
}

impl From<&HistoryItem> for LastWatched {
    fn from(item: &HistoryItem) -> Self {
        Self {
            release: item.release_view().clone(),
            last_view_timestamp: item.last_view_timestamp,
            last_view_episode: item.last_view_episode.clone(),
        }
    }
}
