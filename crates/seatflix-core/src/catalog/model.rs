//! Catalog domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeatflixError;

/// Placeholder shown when TMDB has no poster for a title.
pub const NO_POSTER_PATH: &str = "/no-movie.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = SeatflixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(SeatflixError::validation(format!("unknown media type '{}'", other))),
        }
    }
}

/// TMDB result as it arrives on the wire. Movies and TV use different names.
#[derive(Debug, Deserialize)]
struct RawMedia {
    id: u64,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

impl From<RawMedia> for Media {
    fn from(raw: RawMedia) -> Self {
        let media_type = raw
            .media_type
            .as_deref()
            .and_then(|kind| kind.parse().ok())
            .unwrap_or(if raw.first_air_date.is_some() {
                MediaType::Tv
            } else {
                MediaType::Movie
            });

        Media {
            id: raw.id,
            media_type,
            title: raw.title.or(raw.name).unwrap_or_default(),
            release_date: raw
                .release_date
                .or(raw.first_air_date)
                .filter(|date| !date.is_empty()),
            vote_average: raw.vote_average,
            poster_path: raw.poster_path.filter(|path| !path.is_empty()),
            overview: raw.overview.filter(|text| !text.is_empty()),
        }
    }
}

/// A movie or TV show from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMedia")]
pub struct Media {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

impl Media {
    /// Rating with one decimal, `N/A` when unrated.
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(vote) if vote > 0.0 => format!("{:.1}", vote),
            _ => "N/A".to_string(),
        }
    }

    /// Release year, `N/A` when unknown.
    pub fn release_year(&self) -> &str {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or("N/A")
    }

    pub fn poster_url(&self, image_base_url: &str) -> String {
        match &self.poster_path {
            Some(path) => format!(
                "{}/{}",
                image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => NO_POSTER_PATH.to_string(),
        }
    }

    /// In-app route that plays this title.
    pub fn watch_path(&self) -> String {
        format!("/watch/{}/{}", self.media_type, self.id)
    }
}

/// One page of TMDB results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Media>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// How often a search term was used, with the title it surfaced first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub poster_url: String,
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_fields() {
        let media: Media = serde_json::from_str(
            r#"{"id":603,"title":"The Matrix","release_date":"1999-03-30","vote_average":8.217,"poster_path":"/m.jpg","overview":"Neo"}"#,
        )
        .unwrap();

        assert_eq!(media.media_type, MediaType::Movie);
        assert_eq!(media.title, "The Matrix");
        assert_eq!(media.rating_label(), "8.2");
        assert_eq!(media.release_year(), "1999");
        assert_eq!(
            media.poster_url("https://image.tmdb.org/t/p/w500"),
            "https://image.tmdb.org/t/p/w500/m.jpg"
        );
        assert_eq!(media.watch_path(), "/watch/movie/603");
    }

    #[test]
    fn test_tv_detected_from_first_air_date() {
        let media: Media = serde_json::from_str(
            r#"{"id":1396,"name":"Breaking Bad","first_air_date":"2008-01-20","poster_path":null}"#,
        )
        .unwrap();

        assert_eq!(media.media_type, MediaType::Tv);
        assert_eq!(media.title, "Breaking Bad");
        assert_eq!(media.release_year(), "2008");
        assert_eq!(media.poster_url("https://img"), NO_POSTER_PATH);
        assert_eq!(media.rating_label(), "N/A");
    }

    #[test]
    fn test_explicit_media_type_wins() {
        let media: Media =
            serde_json::from_str(r#"{"id":1,"media_type":"tv","title":"X"}"#).unwrap();
        assert_eq!(media.media_type, MediaType::Tv);
        assert_eq!(media.release_year(), "N/A");
    }

    #[test]
    fn test_media_type_parse() {
        assert_eq!("Movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("tv".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!("anime".parse::<MediaType>().is_err());
    }
}
