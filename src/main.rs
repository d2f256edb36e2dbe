mod config;
mod news;
mod routes;
mod scraper;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, scraper::anilist::AniListClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("anime_news=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let anilist = Arc::new(AniListClient::new(
        config.anilist_url.clone(),
        config.upstream_timeout,
    ));
    tracing::info!(
        bind_addr = %config.bind_addr,
        upstream = %anilist.endpoint(),
        timeout = ?config.upstream_timeout,
        "Configuration loaded"
    );
    let app = routes::router(anilist);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!("News endpoint: http://{}/api/news", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
