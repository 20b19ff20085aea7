//! Release-related models.
//!
//! A release is one anime title from the Anixart catalog. The same shape
//! shows up inside history rows, votes, bookmarks and favorites, so most
//! fields are optional.

use serde::{Deserialize, Serialize};

use super::common::{lenient_string, nullable};

/// Base URL for poster images that the API returns as bare file names.
pub const POSTER_HOST: &str = "https://s.anixmirai.com/posters/";

/// An episode reference attached to a watch event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    /// Episode number within the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// Episode name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A trackable anime title.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// Anixart release ID.
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,

    /// Russian title.
    #[serde(default, deserialize_with = "nullable")]
    pub title_ru: String,

    /// Original (romanized) title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_original: Option<String>,

    /// Alternative titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_alt: Option<String>,

    /// Poster file name or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    /// Image file name or URL, preferred over `poster`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Comma separated genre list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,

    /// Release year.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,

    /// Synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Average user grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,

    /// Catalog rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Release {
    /// Resolve the poster URL against the default poster host.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_url_with(POSTER_HOST)
    }

    /// Resolve the poster URL against a given host.
    ///
    /// `image` wins over `poster`. Absolute URLs are returned unchanged,
    /// bare names without an extension get `.jpg`.
    pub fn poster_url_with(&self, host: &str) -> Option<String> {
        let name = self
            .image
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.poster.as_deref().filter(|s| !s.is_empty()))?;

        if name.starts_with("http://") || name.starts_with("https://") {
            return Some(name.to_string());
        }

        let host = host.trim_end_matches('/');
        if name.contains('.') {
            Some(format!("{}/{}", host, name))
        } else {
            Some(format!("{}/{}.jpg", host, name))
        }
    }

    /// Genres as a list.
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres
            .as_deref()
            .map(|g| {
                g.split(", ")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check whether the release has a displayable title.
    pub fn has_title(&self) -> bool {
        !self.title_ru.trim().is_empty()
    }

    /// Check whether the release carries the detail fields slides show.
    pub fn is_detailed(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
            && self.genres.as_deref().is_some_and(|g| !g.is_empty())
    }

    /// Best title for display: Russian title, then original.
    pub fn display_title(&self) -> &str {
        if self.has_title() {
            &self.title_ru
        } else {
            self.title_original.as_deref().unwrap_or("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_poster_url_prefers_image() {
        let release = Release {
            image: Some("abc".to_string()),
            poster: Some("def.png".to_string()),
            ..Default::default()
        };
        assert_eq!(
            release.poster_url().as_deref(),
            Some("https://s.anixmirai.com/posters/abc.jpg")
        );
    }

    #[test]
    fn test_poster_url_keeps_extension_and_absolute() {
        let release = Release {
            poster: Some("def.png".to_string()),
            ..Default::default()
        };
        assert_eq!(
            release.poster_url_with("https://cdn.example/p/").as_deref(),
            Some("https://cdn.example/p/def.png")
        );

        let release = Release {
            image: Some("https://img.example/x.webp".to_string()),
            ..Default::default()
        };
        assert_eq!(
            release.poster_url().as_deref(),
            Some("https://img.example/x.webp")
        );
        assert_eq!(Release::default().poster_url(), None);
    }

    #[test]
    fn test_genre_list() {
        let release = Release {
            genres: Some("драма, комедия, романтика".to_string()),
            ..Default::default()
        };
        assert_eq!(release.genre_list(), vec!["драма", "комедия", "романтика"]);
        assert!(Release::default().genre_list().is_empty());
    }

    #[test]
    fn test_deserialize_sparse_release() {
        let release: Release = serde_json::from_value(json!({
            "id": 42,
            "title_ru": "Стальной алхимик",
            "year": 2009,
            "grade": 4.9,
            "unknown_field": true
        }))
        .unwrap();
        assert_eq!(release.id, 42);
        assert_eq!(release.year.as_deref(), Some("2009"));
        assert!(release.has_title());
        assert!(!release.is_detailed());
    }
}
