//! Aggregates over watch history and votes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{HistoryItem, LastWatched, Release, Vote};

/// The most watched release and how often it shows up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TopRelease {
    pub release: Release,
    pub watch_count: u32,
}

/// Find the release with the most history entries.
///
/// Entries are grouped by release id (the nested release's id when
/// present). Ties go to the release seen first; entries without an id
/// are skipped.
pub fn top_release_from_history<'a, I>(history: I) -> Option<TopRelease>
where
    I: IntoIterator<Item = &'a HistoryItem>,
{
    // (release, count) in first-seen order
    let mut counts: Vec<(&Release, u32)> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for item in history {
        let Some(id) = item.release_id() else {
            continue;
        };
        match index.get(&id) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(id, counts.len());
                counts.push((item.release_view(), 1));
            }
        }
    }

    let mut best: Option<(&Release, u32)> = None;
    for (release, count) in counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((release, count));
        }
    }

    best.map(|(release, count)| TopRelease {
        release: release.clone(),
        watch_count: count,
    })
}

/// Find the most recent watch.
///
/// Missing timestamps count as 0; on a tie the earlier entry wins.
pub fn last_watched<'a, I>(history: I) -> Option<LastWatched>
where
    I: IntoIterator<Item = &'a HistoryItem>,
{
    let mut latest: Option<&HistoryItem> = None;
    for item in history {
        if latest.map_or(true, |best| item.timestamp() > best.timestamp()) {
            latest = Some(item);
        }
    }
    latest.map(LastWatched::from)
}

/// Five-star votes, first `limit` in input order.
pub fn five_star_picks<'a, I>(votes: I, limit: usize) -> Vec<&'a Vote>
where
    I: IntoIterator<Item = &'a Vote>,
{
    votes
        .into_iter()
        .filter(|v| v.my_vote == Some(5))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Episode;

    fn row(id: i64, title: &str, ts: i64) -> HistoryItem {
        HistoryItem {
            row: Release {
                id,
                title_ru: title.to_string(),
                ..Default::default()
            },
            last_view_timestamp: Some(ts),
            ..Default::default()
        }
    }

    fn vote(id: i64, grade: u8) -> Vote {
        Vote {
            release: Release {
                id,
                ..Default::default()
            },
            my_vote: Some(grade),
            voted_at: Some(1),
        }
    }

    #[test]
    fn test_top_release_by_count() {
        let history = vec![row(1, "a", 1), row(2, "b", 2), row(2, "b", 3), row(3, "c", 4)];
        let top = top_release_from_history(&history).unwrap();
        assert_eq!(top.release.id, 2);
        assert_eq!(top.watch_count, 2);
    }

    #[test]
    fn test_top_release_tie_goes_to_first_seen() {
        let history = vec![row(7, "x", 1), row(8, "y", 2), row(8, "y", 3), row(7, "x", 4)];
        let top = top_release_from_history(&history).unwrap();
        assert_eq!(top.release.id, 7);
    }

    #[test]
    fn test_top_release_uses_nested_release() {
        let mut item = row(1, "row", 1);
        item.release = Some(Release {
            id: 50,
            title_ru: "nested".to_string(),
            ..Default::default()
        });
        let history = vec![item.clone(), item, row(2, "other", 3)];
        let top = top_release_from_history(&history).unwrap();
        assert_eq!(top.release.id, 50);
        assert_eq!(top.release.title_ru, "nested");
    }

    #[test]
    fn test_top_release_skips_rows_without_id() {
        let history = vec![HistoryItem::default(), HistoryItem::default()];
        assert!(top_release_from_history(&history).is_none());
        assert!(top_release_from_history(&Vec::<HistoryItem>::new()).is_none());
    }

    #[test]
    fn test_last_watched_picks_largest_timestamp() {
        let mut latest = row(3, "c", 300);
        latest.last_view_episode = Some(Episode {
            position: Some(12),
            name: None,
        });
        let history = vec![row(1, "a", 100), latest, row(2, "b", 200)];
        let last = last_watched(&history).unwrap();
        assert_eq!(last.release.id, 3);
        assert_eq!(last.last_view_timestamp, Some(300));
        assert_eq!(last.last_view_episode.unwrap().position, Some(12));
    }

    #[test]
    fn test_last_watched_tie_and_missing() {
        let history = vec![row(1, "a", 100), row(2, "b", 100)];
        assert_eq!(last_watched(&history).unwrap().release.id, 1);

        let mut undated = row(9, "z", 0);
        undated.last_view_timestamp = None;
        let history = vec![undated];
        assert_eq!(last_watched(&history).unwrap().release.id, 9);

        assert!(last_watched(&Vec::<HistoryItem>::new()).is_none());
    }

    #[test]
    fn test_last_watched_merges_nested_release() {
        let mut item = row(1, "row", 500);
        item.release = Some(Release {
            id: 77,
            title_ru: "nested".to_string(),
            ..Default::default()
        });
        let last = last_watched(&vec![item]).unwrap();
        assert_eq!(last.release.id, 77);
        assert_eq!(last.last_view_timestamp, Some(500));
    }

    #[test]
    fn test_five_star_picks() {
        let votes = vec![vote(1, 5), vote(2, 4), vote(3, 5), vote(4, 5)];
        let picks = five_star_picks(&votes, 2);
        assert_eq!(
            picks.iter().map(|v| v.release.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }
}
