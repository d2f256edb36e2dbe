use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::news::error::NewsError;

pub const API_URL: &str = "https://graphql.anilist.co";

// First page of currently airing shows, ordered by trending rank
pub const TRENDING_QUERY: &str = "
query {
  Page(page: 1, perPage: 12) {
    media(type: ANIME, sort: TRENDING_DESC, status: RELEASING) {
      id
      title {
        english
        romaji
      }
      description
      coverImage {
        large
      }
      updatedAt
      siteUrl
    }
  }
}";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Title {
    pub english: Option<String>,
    pub romaji: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoverImage {
    pub large: Option<String>,
}

/// One entry of `data.Page.media`. AniList may null out any field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniMedia {
    pub id: Option<u32>,
    pub title: Option<Title>,
    pub description: Option<String>,
    pub cover_image: Option<CoverImage>,
    /// Unix seconds
    pub updated_at: Option<i64>,
    pub site_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Thin client around the AniList GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct AniListClient {
    endpoint: String,
    timeout: Option<Duration>,
}

impl Default for AniListClient {
    fn default() -> Self {
        Self::new(API_URL, None)
    }
}

impl AniListClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the trending page. Null list entries come back as `None`.
    pub async fn fetch_trending(&self) -> Result<Vec<Option<AniMedia>>, NewsError> {
        let body = json!({ "query": TRENDING_QUERY });

        tracing::debug!("Querying AniList trending page at {}", self.endpoint);

        let mut request = super::http_client()
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body.to_string());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::UpstreamStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes)?;

        parse_trending(payload)
    }
}

/// Pulls `data.Page.media` out of a GraphQL reply.
pub fn parse_trending(mut payload: Value) -> Result<Vec<Option<AniMedia>>, NewsError> {
    log_graphql_errors(&payload);

    let media = payload.pointer_mut("/data/Page/media").map(Value::take);
    let Some(Value::Array(entries)) = media else {
        return Err(NewsError::InvalidShape);
    };

    entries
        .into_iter()
        .map(|entry| -> Result<Option<AniMedia>, NewsError> {
            match entry {
                Value::Null => Ok(None),
                other => Ok(Some(serde_json::from_value(other)?)),
            }
        })
        .collect()
}

fn log_graphql_errors(payload: &Value) {
    let Some(errors) = payload.get("errors") else {
        return;
    };
    match Vec::<GraphQlError>::deserialize(errors) {
        Ok(errors) => {
            for err in errors {
                tracing::warn!("AniList reported an error: {}", err.message);
            }
        }
        Err(_) => tracing::warn!("AniList reported errors: {}", errors),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_query_asks_for_trending_releasing_page() {
        assert!(TRENDING_QUERY.contains("Page(page: 1, perPage: 12)"));
        assert!(TRENDING_QUERY.contains("type: ANIME, sort: TRENDING_DESC, status: RELEASING"));
        for field in ["english", "romaji", "description", "large", "updatedAt", "siteUrl"] {
            assert!(TRENDING_QUERY.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_parse_trending_keeps_nulls_in_place() {
        let payload = json!({
            "data": { "Page": { "media": [
                {
                    "id": 1,
                    "title": { "english": "Frieren", "romaji": "Sousou no Frieren" },
                    "description": "An elf <i>mage</i>.",
                    "coverImage": { "large": "https://img/1.jpg" },
                    "updatedAt": 1700000000,
                    "siteUrl": "https://anilist.co/anime/1"
                },
                null,
                { "id": 3 }
            ] } }
        });

        let entries = parse_trending(payload).unwrap();
        assert_eq!(entries.len(), 3);

        let first = entries[0].as_ref().unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(
            first.title.as_ref().and_then(|t| t.romaji.as_deref()),
            Some("Sousou no Frieren")
        );
        assert_eq!(
            first.cover_image.as_ref().and_then(|c| c.large.as_deref()),
            Some("https://img/1.jpg")
        );
        assert_eq!(first.updated_at, Some(1700000000));

        assert!(entries[1].is_none());

        let third = entries[2].as_ref().unwrap();
        assert!(third.title.is_none());
        assert!(third.site_url.is_none());
    }

    #[test]
    fn test_parse_trending_missing_media() {
        let res = parse_trending(json!({ "data": { "Page": {} } }));
        assert!(matches!(res, Err(NewsError::InvalidShape)));
    }

    #[test]
    fn test_parse_trending_media_not_a_list() {
        let res = parse_trending(json!({ "data": { "Page": { "media": { "id": 1 } } } }));
        assert!(matches!(res, Err(NewsError::InvalidShape)));
    }

    #[test]
    fn test_parse_trending_graphql_error_reply() {
        let payload = json!({
            "data": null,
            "errors": [{ "message": "Too Many Requests.", "status": 429 }]
        });
        assert!(matches!(parse_trending(payload), Err(NewsError::InvalidShape)));
    }

    #[test]
    fn test_parse_trending_empty_list() {
        let payload = json!({ "data": { "Page": { "media": [] } } });
        assert!(parse_trending(payload).unwrap().is_empty());
    }

    #[test]
    fn test_parse_trending_rejects_wrong_field_types() {
        let payload = json!({ "data": { "Page": { "media": [{ "updatedAt": "yesterday" }] } } });
        assert!(matches!(parse_trending(payload), Err(NewsError::Decode(_))));
    }

    #[ignore]
    #[tokio::test]
    async fn test_fetch_trending_live() {
        let entries = AniListClient::default().fetch_trending().await.unwrap();
        assert!(!entries.is_empty());
        assert!(entries.len() <= 12);
    }
}
