pub mod adapters;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use adapters::app_state::AppState;
use adapters::geolocation_client::GeolocationClient;
use adapters::http::{HttpServer, HttpServerConfig};
use infrastructure::repository::geolocation_repository::{init_db, MongoGeolocationStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = config::Config::from_env()?;

    tracing::info!("connecting to MongoDB...");
    let database = init_db(&config).await?;
    let store = MongoGeolocationStore::new(&database).await?;

    let state = AppState {
        store: Arc::new(store),
        geo_client: GeolocationClient::new(
            config.ipstack_url.clone(),
            config.ipstack_api_key.clone(),
        ),
    };

    let http_server = HttpServer::new(
        HttpServerConfig {
            port: &config.server_port,
        },
        state,
    )
    .await?;
    http_server.run().await
}
