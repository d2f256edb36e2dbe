//! News records served to the front-end
//!
//! Maps AniList media entries onto the fixed `AnimeNews` shape. Every output
//! field has a fallback, so a record never contains nulls.

pub mod error;

use std::borrow::Cow;
use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat};
use regex::Regex;
use serde::Serialize;

use crate::scraper::anilist::AniMedia;
use error::NewsError;

pub const AUTHOR_USERNAME: &str = "AniList";
pub const UNTITLED: &str = "Untitled Anime";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-anime.jpg";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_FORUM_URL: &str = "#";

const EXCERPT_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

/// Largest absolute millisecond offset a browser `Date` accepts.
const MAX_TIMESTAMP_MILLIS: i64 = 8_640_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimeNews {
    pub title: String,
    pub date: String,
    pub author_username: String,
    pub forum_url: String,
    pub images: Images,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Images {
    pub jpg: JpgImage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JpgImage {
    pub image_url: String,
}

impl AnimeNews {
    pub fn from_media(media: &AniMedia) -> Result<Self, NewsError> {
        let title = media
            .title
            .as_ref()
            .and_then(|t| present(&t.english).or_else(|| present(&t.romaji)))
            .unwrap_or(UNTITLED);

        let image_url = media
            .cover_image
            .as_ref()
            .and_then(|c| present(&c.large))
            .unwrap_or(PLACEHOLDER_IMAGE);

        let date = format_timestamp(media.updated_at).inspect_err(|_| {
            tracing::warn!(
                "AniList entry {:?} has an unusable updatedAt: {:?}",
                media.id,
                media.updated_at
            )
        })?;

        Ok(Self {
            title: title.to_string(),
            date,
            author_username: AUTHOR_USERNAME.to_string(),
            forum_url: present(&media.site_url).unwrap_or(NO_FORUM_URL).to_string(),
            images: Images {
                jpg: JpgImage {
                    image_url: image_url.to_string(),
                },
            },
            excerpt: build_excerpt(present(&media.description)),
        })
    }
}

/// Maps upstream entries in order, dropping null ones.
pub fn collect_news(entries: Vec<Option<AniMedia>>) -> Result<Vec<AnimeNews>, NewsError> {
    let news = entries
        .iter()
        .flatten()
        .map(AnimeNews::from_media)
        .collect::<Result<Vec<_>, _>>()?;

    if news.is_empty() {
        return Err(NewsError::Empty);
    }

    Ok(news)
}

/// Tag-free description cut to 200 characters plus an ellipsis.
pub fn build_excerpt(description: Option<&str>) -> String {
    match description {
        Some(text) => {
            let mut excerpt: String = strip_tags(text).chars().take(EXCERPT_CHARS).collect();
            excerpt.push_str(ELLIPSIS);
            excerpt
        }
        None => NO_DESCRIPTION.to_string(),
    }
}

pub fn strip_tags(text: &str) -> Cow<'_, str> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let re = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
    re.replace_all(text, "")
}

/// Formats Unix seconds as `YYYY-MM-DDTHH:MM:SS.mmmZ`. A null timestamp is the epoch.
pub fn format_timestamp(seconds: Option<i64>) -> Result<String, NewsError> {
    let seconds = seconds.unwrap_or(0);
    let millis = seconds
        .checked_mul(1000)
        .filter(|ms| ms.abs() <= MAX_TIMESTAMP_MILLIS)
        .ok_or(NewsError::InvalidTimestamp)?;

    let date = DateTime::from_timestamp_millis(millis).ok_or(NewsError::InvalidTimestamp)?;
    Ok(date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// Empty strings fall through to the next candidate
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
