//! Year-in-review pipeline.
//!
//! This module fetches everything the slides need and derives the yearly
//! figures. Only the profile is mandatory; every other fetch degrades to
//! an empty result so the report renders with whatever succeeded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, warn};

use crate::api::AnixartApi;
use crate::config::WrappedConfig;
use crate::error::Result;
use crate::models::{
    BookmarkKind, Collection, HistoryItem, LastWatched, Page, Profile, Release, SortOrder, Vote,
};
use crate::stats::{
    any_in_year, count_in_year, filter_by_year, five_star_picks, last_watched,
    top_release_from_history, TimeStats, Timestamped, TopRelease, YearWindow,
};

/// Data the pipeline reads.
///
/// [`AnixartApi`] is the real implementation.
#[async_trait]
pub trait WrappedSource: Send + Sync {
    /// The signed-in user's profile.
    async fn profile(&self) -> Result<Profile>;

    /// One page of watch history, most recent first.
    async fn history(&self, page: u64) -> Result<Page<HistoryItem>>;

    /// One page of the profile's votes, most recent first.
    async fn votes(&self, profile_id: i64, page: u64) -> Result<Page<Vote>>;

    /// Full release details.
    async fn release(&self, id: i64) -> Result<Release>;

    /// One page of the profile's collections.
    async fn collections(&self, profile_id: i64, page: u64) -> Result<Page<Collection>>;

    /// One page of favorites, most recently added first.
    async fn favorites(&self, page: u64) -> Result<Page<Release>>;

    /// One page of a bookmark list, most recently added first.
    async fn bookmarks(&self, profile_id: i64, kind: BookmarkKind, page: u64)
        -> Result<Page<Release>>;

    /// Entries per page for listings.
    fn page_size(&self) -> u64 {
        25
    }
}

#[async_trait]
impl WrappedSource for AnixartApi {
    async fn profile(&self) -> Result<Profile> {
        self.get_profile(None).await
    }

    async fn history(&self, page: u64) -> Result<Page<HistoryItem>> {
        self.get_history(page).await
    }

    async fn votes(&self, profile_id: i64, page: u64) -> Result<Page<Vote>> {
        self.get_votes(profile_id, page, SortOrder::NewestAdded)
            .await
    }

    async fn release(&self, id: i64) -> Result<Release> {
        self.get_release(id).await
    }

    async fn collections(&self, profile_id: i64, page: u64) -> Result<Page<Collection>> {
        self.get_collections(profile_id, page).await
    }

    async fn favorites(&self, page: u64) -> Result<Page<Release>> {
        self.get_favorites(page, SortOrder::NewestAdded).await
    }

    async fn bookmarks(
        &self,
        profile_id: i64,
        kind: BookmarkKind,
        page: u64,
    ) -> Result<Page<Release>> {
        self.get_bookmarks(profile_id, kind, page, SortOrder::NewestAdded)
            .await
    }

    fn page_size(&self) -> u64 {
        AnixartApi::page_size(self)
    }
}

/// Per-category counts for the year slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct YearStats {
    /// History entries inside the year.
    pub watched: u64,
    pub watching: u64,
    pub planned: u64,
    pub completed: u64,
    pub on_hold: u64,
    pub dropped: u64,
    pub favorites_added: u64,
    pub comments: u64,
    /// Bookmark counts came from the profile because every list failed.
    #[serde(default)]
    pub counts_from_profile: bool,
}

impl YearStats {
    /// Count for one bookmark category.
    pub fn bookmark_count(&self, kind: BookmarkKind) -> u64 {
        match kind {
            BookmarkKind::Watching => self.watching,
            BookmarkKind::Planned => self.planned,
            BookmarkKind::Completed => self.completed,
            BookmarkKind::OnHold => self.on_hold,
            BookmarkKind::Dropped => self.dropped,
        }
    }

    fn set_bookmark_count(&mut self, kind: BookmarkKind, count: u64) {
        match kind {
            BookmarkKind::Watching => self.watching = count,
            BookmarkKind::Planned => self.planned = count,
            BookmarkKind::Completed => self.completed = count,
            BookmarkKind::OnHold => self.on_hold = count,
            BookmarkKind::Dropped => self.dropped = count,
        }
    }
}

/// Everything the slides show.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Wrapped {
    pub year: i32,
    /// Zone the year was evaluated in; dates are shown in it too.
    #[serde(skip)]
    pub window: YearWindow,
    pub profile: Profile,
    pub time: TimeStats,
    pub top_release: Option<TopRelease>,
    pub last_watched: Option<LastWatched>,
    pub collections: Vec<Collection>,
    pub favorites: Vec<Release>,
    pub top_rated: Vec<Vote>,
    pub year_stats: YearStats,
    /// History entries fetched while walking pages.
    pub history_scanned: usize,
    /// Votes fetched while walking pages.
    pub votes_scanned: usize,
}

/// Builds a [`Wrapped`] from a data source.
///
/// # Example
///
/// ```rust,no_run
/// use anixart_wrapped::{AnixartApi, ClientConfig, Session, WrappedBuilder, YearWindow};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = AnixartApi::new(ClientConfig::default(), Session::new("token", 1))?;
///     let wrapped = WrappedBuilder::new(&api, YearWindow::current()).build().await?;
///     println!("{} titles watched in {}", wrapped.year_stats.watched, wrapped.year);
///     Ok(())
/// }
/// ```
pub struct WrappedBuilder<'a, S: WrappedSource> {
    source: &'a S,
    window: YearWindow,
    top_rated_limit: usize,
    max_pages: u64,
    now: DateTime<Utc>,
}

impl<'a, S: WrappedSource> WrappedBuilder<'a, S> {
    /// Create a builder for one year.
    pub fn new(source: &'a S, window: YearWindow) -> Self {
        let defaults = WrappedConfig::default();
        Self {
            source,
            window,
            top_rated_limit: defaults.top_rated_limit,
            max_pages: defaults.max_pages,
            now: Utc::now(),
        }
    }

    /// Apply pipeline settings.
    pub fn with_config(mut self, config: &WrappedConfig) -> Self {
        self.top_rated_limit = config.top_rated_limit;
        self.max_pages = config.max_pages;
        self
    }

    /// Override the clock used for registration age.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Fetch and aggregate.
    ///
    /// # Errors
    ///
    /// Only a failed profile fetch is an error.
    pub async fn build(self) -> Result<Wrapped> {
        let profile = self.source.profile().await?;
        info!(
            "Building {} wrapped for {} (profile {})",
            self.window.year(),
            profile.login,
            profile.id
        );

        let history = self
            .collect_year("history", |page| self.source.history(page))
            .await;
        let votes = self
            .collect_year("votes", |page| self.source.votes(profile.id, page))
            .await;

        let year_history = filter_by_year(&history, &self.window);
        let year_votes = filter_by_year(&votes, &self.window);

        let top_release = self.resolve_top_release(&year_history).await;
        let last_watched = last_watched(year_history.iter().copied());

        let collections = self.load_collections(profile.id).await;
        let favorites = self.load_favorites().await;
        let top_rated = self.load_top_rated(&year_votes).await;

        let mut year_stats = self.load_bookmark_counts(&profile).await;
        year_stats.watched = count_in_year(&history, &self.window) as u64;
        year_stats.favorites_added = favorites.len() as u64;
        year_stats.comments = profile.comment_count;

        info!(
            "Wrapped ready: {} history entries in year, {} five-star picks",
            year_stats.watched,
            top_rated.len()
        );

        Ok(Wrapped {
            year: self.window.year(),
            window: self.window,
            time: TimeStats::from_profile(&profile, self.now),
            profile,
            top_release,
            last_watched,
            collections,
            favorites,
            top_rated,
            year_stats,
            history_scanned: history.len(),
            votes_scanned: votes.len(),
        })
    }

    /// Walk a most-recent-first listing until a page has nothing in the year.
    ///
    /// Pages that reach into the year are kept whole. A failed page ends
    /// the walk and keeps what was collected.
    async fn collect_year<T, F, Fut>(&self, what: &str, fetch: F) -> Vec<T>
    where
        T: Timestamped,
        F: Fn(u64) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut collected = Vec::new();
        let mut page_count = 1;
        let mut page = 0;

        while page < page_count.min(self.max_pages) {
            let data = match fetch(page).await {
                Ok(data) => data,
                Err(e) => {
                    warn!("Stopped reading {} at page {}: {}", what, page, e);
                    break;
                }
            };

            if page == 0 {
                page_count = data.page_count(self.source.page_size());
            }

            if !any_in_year(&data.content, &self.window) {
                debug!("{} page {} has nothing from {}", what, page, self.window.year());
                break;
            }

            collected.extend(data.content);
            page += 1;
        }

        debug!("Collected {} {} entries over {} pages", collected.len(), what, page);
        collected
    }

    /// Most watched release, enriched with catalog details.
    async fn resolve_top_release(&self, history: &[&HistoryItem]) -> Option<TopRelease> {
        let top = top_release_from_history(history.iter().copied())?;

        match self.source.release(top.release.id).await {
            Ok(release) => Some(TopRelease {
                release,
                watch_count: top.watch_count,
            }),
            Err(e) => {
                warn!(
                    "Could not fetch top release {}: {}",
                    top.release.id, e
                );
                top.release.has_title().then_some(top)
            }
        }
    }

    async fn load_collections(&self, profile_id: i64) -> Vec<Collection> {
        match self.source.collections(profile_id, 0).await {
            Ok(page) => page.content,
            Err(e) => {
                warn!("Skipping collections: {}", e);
                Vec::new()
            }
        }
    }

    async fn load_favorites(&self) -> Vec<Release> {
        match self.source.favorites(0).await {
            Ok(page) => page.content,
            Err(e) => {
                warn!("Skipping favorites: {}", e);
                Vec::new()
            }
        }
    }

    /// Five-star votes from the year, with missing details filled in.
    ///
    /// When none of the picks carries a title, the picks are loaded from
    /// the catalog instead and the ones that fail are dropped.
    async fn load_top_rated(&self, votes: &[&Vote]) -> Vec<Vote> {
        let picks = five_star_picks(votes.iter().copied(), self.top_rated_limit);
        let titled: Vec<Vote> = picks
            .iter()
            .filter(|v| v.release.has_title())
            .map(|&v| v.clone())
            .collect();

        if titled.is_empty() {
            return self.load_top_rated_from_catalog(&picks).await;
        }

        join_all(titled.into_iter().map(|mut vote| async move {
            if vote.release.is_detailed() {
                return vote;
            }
            match self.source.release(vote.release.id).await {
                Ok(full) => vote.enrich(full),
                Err(e) => debug!("Keeping vote data for {}: {}", vote.release.id, e),
            }
            vote
        }))
        .await
    }

    async fn load_top_rated_from_catalog(&self, picks: &[&Vote]) -> Vec<Vote> {
        if picks.is_empty() {
            return Vec::new();
        }
        debug!("Five-star votes carry no titles, loading {} from the catalog", picks.len());

        join_all(picks.iter().map(|&vote| async move {
            match self.source.release(vote.release.id).await {
                Ok(full) => Some(Vote {
                    release: full,
                    my_vote: vote.my_vote,
                    voted_at: vote.voted_at,
                }),
                Err(e) => {
                    debug!("Dropping five-star pick {}: {}", vote.release.id, e);
                    None
                }
            }
        }))
        .await
        .into_iter()
        .flatten()
        .collect()
    }

    /// Bookmark counts, all five lists requested together.
    ///
    /// A failed list counts 0. When every list fails, the profile's
    /// cached counters are used instead.
    async fn load_bookmark_counts(&self, profile: &Profile) -> YearStats {
        let results = join_all(BookmarkKind::all().iter().map(|&kind| async move {
            (kind, self.source.bookmarks(profile.id, kind, 0).await)
        }))
        .await;

        let mut stats = YearStats::default();
        let mut failed = 0;

        for (kind, result) in results {
            match result {
                Ok(page) => {
                    let count = page.total_count.max(page.content.len() as u64);
                    stats.set_bookmark_count(kind, count);
                }
                Err(e) => {
                    warn!("Bookmark list {} failed: {}", kind.label(), e);
                    failed += 1;
                }
            }
        }

        if failed == BookmarkKind::all().len() {
            warn!("All bookmark lists failed, using profile counters");
            for &kind in BookmarkKind::all() {
                stats.set_bookmark_count(kind, profile.cached_count(kind));
            }
            stats.counts_from_profile = true;
        }

        stats
    }
}
