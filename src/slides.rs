//! Slide ordering and navigation.
//!
//! A [`Deck`] is the ordered list of slides a [`Wrapped`] produces plus a
//! cursor. Slides without data are left out or shown as placeholders.

use serde::Serialize;

use crate::models::Profile;
use crate::wrapped::{Wrapped, YearStats};

/// One slide of the year in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slide {
    Welcome,
    Time,
    Activity,
    /// Shows a placeholder when no top release could be derived.
    TopRelease,
    Preferences,
    Collections,
    /// Shows a placeholder when the year has no watch history.
    LastWatched,
    Favorites,
    TopRated,
    YearStats,
    Final,
}

impl Slide {
    /// Slide title.
    pub fn title(&self) -> &'static str {
        match self {
            Slide::Welcome => "Welcome",
            Slide::Time => "Time spent watching",
            Slide::Activity => "Activity",
            Slide::TopRelease => "Top release",
            Slide::Preferences => "Preferences",
            Slide::Collections => "Collections",
            Slide::LastWatched => "Last watched",
            Slide::Favorites => "Favorites",
            Slide::TopRated => "Rated five stars",
            Slide::YearStats => "Your year",
            Slide::Final => "See you next year",
        }
    }
}

/// A labelled number on a stats slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: u64,
}

impl Stat {
    fn new(label: &'static str, value: u64) -> Self {
        Self { label, value }
    }
}

/// Activity slide: main stats always shown, extra ones only when non-zero.
pub fn activity_stats(profile: &Profile) -> (Vec<Stat>, Vec<Stat>) {
    let main = vec![
        Stat::new("Episodes watched", profile.watched_episode_count),
        Stat::new("Titles completed", profile.completed_count),
        Stat::new("In favorites", profile.favorite_count),
    ];

    let extra = [
        Stat::new("Watching now", profile.watching_count.unwrap_or(0)),
        Stat::new("Planned", profile.plan_count.unwrap_or(0)),
        Stat::new("Friends", profile.friend_count),
        Stat::new("Comments", profile.comment_count),
    ]
    .into_iter()
    .filter(|s| s.value > 0)
    .collect();

    (main, extra)
}

/// Year slide: main stats always shown, the rest only when non-zero.
pub fn year_stats_rows(stats: &YearStats) -> (Vec<Stat>, Vec<Stat>) {
    let main = vec![
        Stat::new("Watched", stats.watched),
        Stat::new("Completed", stats.completed),
        Stat::new("Watching", stats.watching),
    ];

    let secondary = [
        Stat::new("Planned", stats.planned),
        Stat::new("Dropped", stats.dropped),
        Stat::new("On hold", stats.on_hold),
        Stat::new("Added to favorites", stats.favorites_added),
        Stat::new("Comments written", stats.comments),
    ]
    .into_iter()
    .filter(|s| s.value > 0)
    .collect();

    (main, secondary)
}

/// Ordered slides with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<Slide>,
    position: usize,
}

impl Deck {
    /// Build the deck for a wrapped year.
    ///
    /// Favorites and five-star slides are left out when empty.
    pub fn from_wrapped(wrapped: &Wrapped) -> Self {
        let mut slides = vec![
            Slide::Welcome,
            Slide::Time,
            Slide::Activity,
            Slide::TopRelease,
            Slide::Preferences,
            Slide::Collections,
            Slide::LastWatched,
        ];
        if !wrapped.favorites.is_empty() {
            slides.push(Slide::Favorites);
        }
        if !wrapped.top_rated.is_empty() {
            slides.push(Slide::TopRated);
        }
        slides.push(Slide::YearStats);
        slides.push(Slide::Final);

        Self {
            slides,
            position: 0,
        }
    }

    /// All slides in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// 0-based index of the current slide.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<Slide> {
        self.slides.get(self.position).copied()
    }

    /// Advance one slide. Returns false at the last slide.
    pub fn next(&mut self) -> bool {
        if self.position + 1 < self.slides.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Go back one slide. Returns false at the first slide.
    pub fn prev(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a slide, clamped to the deck.
    pub fn go_to(&mut self, index: usize) {
        self.position = index.min(self.slides.len().saturating_sub(1));
    }

    /// Progress through the deck in percent, counting the current slide.
    pub fn progress(&self) -> f64 {
        if self.slides.is_empty() {
            return 0.0;
        }
        (self.position + 1) as f64 / self.slides.len() as f64 * 100.0
    }
}
