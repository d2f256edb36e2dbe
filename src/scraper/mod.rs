pub mod anilist;

use reqwest::Client;
use std::sync::OnceLock;

/// Global HTTP client for connection pooling across requests.
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Returns a reference to the shared HTTP client.
/// The client is lazily initialized on first use with a small idle pool,
/// since every request talks to the same upstream host.
pub fn http_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .pool_max_idle_per_host(2)
            .user_agent(concat!("anime_news/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
