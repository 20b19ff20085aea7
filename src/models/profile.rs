//! Profile models.

use serde::{Deserialize, Serialize};

use super::bookmark::BookmarkKind;
use super::common::nullable;
use super::history::{HistoryItem, Vote};

/// Achievement badge shown next to the login.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub type_: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A genre, audience or theme with its share of the user's watching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PreferredItem {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub percentage: f64,
}

/// Episodes watched on one day of the last week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchDynamics {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub day: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub timestamp: i64,
}

/// User account record.
///
/// Counters default to zero when the API omits them or sends `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Profile ID.
    pub id: i64,

    /// Login (display name).
    #[serde(default, deserialize_with = "nullable")]
    pub login: String,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,

    #[serde(default, deserialize_with = "nullable")]
    pub watched_episode_count: u64,

    /// Total watch time in minutes.
    #[serde(default, deserialize_with = "nullable")]
    pub watched_time: u64,

    #[serde(default, deserialize_with = "nullable")]
    pub completed_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub favorite_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub friend_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub comment_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watching_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_on_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropped_count: Option<u64>,

    /// Registration time (unix seconds).
    #[serde(default, deserialize_with = "nullable")]
    pub register_date: i64,

    /// Last activity time (unix seconds).
    #[serde(default, deserialize_with = "nullable")]
    pub last_activity_time: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<Vote>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_dynamics: Option<Vec<WatchDynamics>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_genres: Option<Vec<PreferredItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_audiences: Option<Vec<PreferredItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_themes: Option<Vec<PreferredItem>>,
}

impl Profile {
    /// Cached bookmark counter kept on the profile for a category.
    pub fn cached_count(&self, kind: BookmarkKind) -> u64 {
        match kind {
            BookmarkKind::Watching => self.watching_count.unwrap_or(0),
            BookmarkKind::Planned => self.plan_count.unwrap_or(0),
            BookmarkKind::Completed => self.completed_count,
            BookmarkKind::OnHold => self.hold_on_count.unwrap_or(0),
            BookmarkKind::Dropped => self.dropped_count.unwrap_or(0),
        }
    }
}
