//! Data models for Anixart API responses.
//!
//! Plain records mirroring the API's JSON. Optional fields stay optional;
//! counters default to zero.

pub mod bookmark;
pub mod common;
pub mod history;
pub mod profile;
pub mod release;

// Re-exports for convenience
pub use bookmark::{BookmarkKind, Collection, SortOrder};
pub use common::Page;
pub use history::{HistoryItem, LastWatched, Vote};
pub use profile::{Badge, PreferredItem, Profile, WatchDynamics};
pub use release::{Episode, Release, POSTER_HOST};
