pub mod news;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::scraper::anilist::AniListClient;

pub fn router(anilist: Arc<AniListClient>) -> Router {
    Router::new()
        .route("/api/news", get(news::latest_news))
        .with_state(anilist)
        .layer(TraceLayer::new_for_http())
}
