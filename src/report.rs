//! Text and JSON rendering of a wrapped year.

use std::fmt::{self, Write};

use crate::error::Result;
use crate::models::{LastWatched, PreferredItem, Release, Vote};
use crate::slides::{activity_stats, year_stats_rows, Deck, Slide, Stat};
use crate::wrapped::Wrapped;

/// Serialize the whole wrapped year as pretty JSON.
pub fn to_json(wrapped: &Wrapped) -> Result<String> {
    Ok(serde_json::to_string_pretty(wrapped)?)
}

/// Render every slide of the deck, separated by blank lines.
pub fn render_deck(wrapped: &Wrapped, deck: &Deck) -> String {
    deck.slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            format!(
                "[{}/{}] {}",
                i + 1,
                deck.len(),
                render_slide(wrapped, *slide)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one slide as plain text.
pub fn render_slide(wrapped: &Wrapped, slide: Slide) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_slide(&mut out, wrapped, slide);
    out
}

fn write_slide(out: &mut String, wrapped: &Wrapped, slide: Slide) -> fmt::Result {
    writeln!(out, "{}", slide.title())?;

    match slide {
        Slide::Welcome => {
            writeln!(out, "  Hi, {}! Here is your {}.", wrapped.profile.login, wrapped.year)?;
        }
        Slide::Time => {
            let t = &wrapped.time;
            writeln!(out, "  {} hours ({} days) of anime", t.hours, t.days)?;
            writeln!(out, "  {} minutes in total", t.watched_minutes)?;
            if t.average_per_day > 0.0 {
                writeln!(out, "  {:.1} hours per day on average", t.average_per_day)?;
            }
        }
        Slide::Activity => {
            let (main, extra) = activity_stats(&wrapped.profile);
            write_stats(out, &main)?;
            write_stats(out, &extra)?;
        }
        Slide::TopRelease => match &wrapped.top_release {
            Some(top) => {
                write_release(out, &top.release)?;
                writeln!(out, "  watched {} times this year", top.watch_count)?;
            }
            None => writeln!(out, "  No top release data")?,
        },
        Slide::Preferences => {
            let p = &wrapped.profile;
            write_preferences(out, "Genres", p.preferred_genres.as_deref(), 10)?;
            write_preferences(out, "Audiences", p.preferred_audiences.as_deref(), 5)?;
            write_preferences(out, "Themes", p.preferred_themes.as_deref(), 5)?;
        }
        Slide::Collections => {
            writeln!(out, "  {} collections", wrapped.collections.len())?;
            if let Some(first) = wrapped.collections.first() {
                writeln!(out, "  Latest: {}", first.title)?;
                if let Some(desc) = first.description.as_deref().filter(|d| !d.is_empty()) {
                    writeln!(out, "    {}", desc)?;
                }
            }
        }
        Slide::LastWatched => match &wrapped.last_watched {
            Some(last) => write_last_watched(out, wrapped, last)?,
            None => writeln!(out, "  No recent watch data")?,
        },
        Slide::Favorites => {
            writeln!(out, "  {} titles", wrapped.favorites.len())?;
            for release in &wrapped.favorites {
                writeln!(out, "  - {}", release.display_title())?;
            }
        }
        Slide::TopRated => {
            writeln!(out, "  {} titles", wrapped.top_rated.len())?;
            for vote in &wrapped.top_rated {
                write_pick(out, vote)?;
            }
        }
        Slide::YearStats => {
            let (main, secondary) = year_stats_rows(&wrapped.year_stats);
            write_stats(out, &main)?;
            write_stats(out, &secondary)?;
            if wrapped.year_stats.counts_from_profile {
                writeln!(out, "  (list counts taken from profile totals)")?;
            }
        }
        Slide::Final => {
            writeln!(out, "  Thanks for watching with us in {}!", wrapped.year)?;
        }
    }

    Ok(())
}

fn write_stats(out: &mut String, stats: &[Stat]) -> fmt::Result {
    for stat in stats {
        writeln!(out, "  {:>6}  {}", stat.value, stat.label)?;
    }
    Ok(())
}

fn write_release(out: &mut String, release: &Release) -> fmt::Result {
    writeln!(out, "  {}", release.display_title())?;
    if let Some(original) = release.title_original.as_deref().filter(|t| !t.is_empty()) {
        if original != release.display_title() {
            writeln!(out, "  {}", original)?;
        }
    }
    if let Some(year) = &release.year {
        writeln!(out, "  year: {}", year)?;
    }
    let genres = release.genre_list();
    if !genres.is_empty() {
        let shown = &genres[..genres.len().min(5)];
        writeln!(out, "  genres: {}", shown.join(", "))?;
    }
    if let Some(url) = release.poster_url() {
        writeln!(out, "  poster: {}", url)?;
    }
    Ok(())
}

fn write_last_watched(out: &mut String, wrapped: &Wrapped, last: &LastWatched) -> fmt::Result {
    write_release(out, &last.release)?;
    if let Some(episode) = &last.last_view_episode {
        match (episode.position, episode.name.as_deref()) {
            (Some(n), Some(name)) => writeln!(out, "  episode {}: {}", n, name)?,
            (Some(n), None) => writeln!(out, "  episode {}", n)?,
            (None, Some(name)) => writeln!(out, "  {}", name)?,
            (None, None) => {}
        }
    }
    if let Some(ts) = last.last_view_timestamp {
        writeln!(out, "  on {}", wrapped.window.format_date(ts))?;
    }
    Ok(())
}

fn write_pick(out: &mut String, vote: &Vote) -> fmt::Result {
    let genres = vote.release.genre_list();
    if genres.is_empty() {
        return writeln!(out, "  ★★★★★ {}", vote.release.display_title());
    }
    let shown = &genres[..genres.len().min(4)];
    writeln!(
        out,
        "  ★★★★★ {} ({})",
        vote.release.display_title(),
        shown.join(", ")
    )
}

fn write_preferences(
    out: &mut String,
    label: &str,
    items: Option<&[PreferredItem]>,
    limit: usize,
) -> fmt::Result {
    let Some(items) = items.filter(|i| !i.is_empty()) else {
        return Ok(());
    };
    writeln!(out, "  {}:", label)?;
    for item in items.iter().take(limit) {
        writeln!(out, "    {:>5.1}%  {}", item.percentage, item.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Episode, Profile};
    use crate::stats::{TopRelease, YearWindow};

    fn sample() -> Wrapped {
        Wrapped {
            year: 2024,
            window: YearWindow::utc(2024),
            profile: Profile {
                id: 1,
                login: "neko".to_string(),
                watched_episode_count: 321,
                ..Default::default()
            },
            top_release: Some(TopRelease {
                release: Release {
                    id: 6,
                    title_ru: "Монолог фармацевта".to_string(),
                    genres: Some("драма, детектив".to_string()),
                    image: Some("abc".to_string()),
                    ..Default::default()
                },
                watch_count: 24,
            }),
            last_watched: Some(LastWatched {
                release: Release {
                    id: 7,
                    title_ru: "Фрирен".to_string(),
                    ..Default::default()
                },
                last_view_timestamp: Some(1_709_596_800),
                last_view_episode: Some(Episode {
                    position: Some(28),
                    name: None,
                }),
            }),
            top_rated: vec![Vote {
                release: Release {
                    id: 8,
                    title_ru: "Гинтама".to_string(),
                    ..Default::default()
                },
                my_vote: Some(5),
                voted_at: Some(1_709_596_800),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_top_release() {
        let text = render_slide(&sample(), Slide::TopRelease);
        assert!(text.contains("Монолог фармацевта"));
        assert!(text.contains("watched 24 times"));
        assert!(text.contains("https://s.anixmirai.com/posters/abc.jpg"));
    }

    #[test]
    fn test_render_placeholders() {
        let wrapped = Wrapped::default();
        assert!(render_slide(&wrapped, Slide::TopRelease).contains("No top release data"));
        assert!(render_slide(&wrapped, Slide::LastWatched).contains("No recent watch data"));
    }

    #[test]
    fn test_render_last_watched() {
        let text = render_slide(&sample(), Slide::LastWatched);
        assert!(text.contains("episode 28"));
        assert!(text.contains("5 March 2024"));
    }

    #[test]
    fn test_last_watched_date_in_window_zone() {
        let moscow = chrono::FixedOffset::east_opt(3 * 3600).unwrap();
        let mut wrapped = sample();
        wrapped.window = YearWindow::fixed(2024, moscow);
        if let Some(last) = wrapped.last_watched.as_mut() {
            // 2023-12-31T21:30:00Z
            last.last_view_timestamp = Some(1_704_058_200);
        }
        let text = render_slide(&wrapped, Slide::LastWatched);
        assert!(text.contains("on 1 January 2024"));
    }

    #[test]
    fn test_render_deck_numbers_slides() {
        let wrapped = sample();
        let deck = Deck::from_wrapped(&wrapped);
        let text = render_deck(&wrapped, &deck);
        assert!(text.starts_with("[1/10] Welcome"));
        assert!(text.contains("[9/10] Your year"));
        assert!(text.contains("★★★★★ Гинтама"));
    }

    #[test]
    fn test_json_output() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["year"], 2024);
        assert_eq!(value["top_release"]["watch_count"], 24);
        assert_eq!(value["profile"]["login"], "neko");
    }
}
