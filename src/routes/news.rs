use std::sync::Arc;

use axum::{extract::State, Json};

use crate::news::{collect_news, error::NewsError, AnimeNews};
use crate::scraper::anilist::AniListClient;

/// GET /api/news: the current trending page as news cards.
pub async fn latest_news(
    State(anilist): State<Arc<AniListClient>>,
) -> Result<Json<Vec<AnimeNews>>, NewsError> {
    match fetch_news(&anilist).await {
        Ok(news) => {
            tracing::debug!("Serving {} news item(s)", news.len());
            Ok(Json(news))
        }
        Err(err) => {
            tracing::error!("News fetch error: {:?}", err);
            Err(err)
        }
    }
}

async fn fetch_news(anilist: &AniListClient) -> Result<Vec<AnimeNews>, NewsError> {
    let entries = anilist.fetch_trending().await?;
    collect_news(entries)
}
