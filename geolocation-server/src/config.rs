use std::env;

use anyhow::Context;

const SERVER_PORT_KEY: &str = "SERVER_PORT";

const MONGO_URI_KEY: &str = "MONGO_URI";

const MONGO_DB_NAME_KEY: &str = "MONGO_DB_NAME";

const IPSTACK_URL_KEY: &str = "IPSTACK_URL";

const IPSTACK_API_KEY_KEY: &str = "IPSTACK_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_port: String,
    pub mongo_uri: String,
    pub mongo_db_name: String,
    pub ipstack_url: String,
    pub ipstack_api_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();

        let server_port = load_env(SERVER_PORT_KEY).unwrap_or("3000".to_string());

        let mongo_uri = load_env(MONGO_URI_KEY).context("Failed to get the MongoDB URI")?;

        let mongo_db_name =
            load_env(MONGO_DB_NAME_KEY).context("Failed to get the MongoDB database name")?;

        let ipstack_url = load_env(IPSTACK_URL_KEY).context("Failed to get the ipstack URL")?;

        let ipstack_api_key =
            load_env(IPSTACK_API_KEY_KEY).context("Failed to get the ipstack API key")?;

        Ok(Config {
            server_port,
            mongo_uri,
            mongo_db_name,
            ipstack_url,
            ipstack_api_key,
        })
    }
}

fn load_env(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("failed to load environment variable {}", key))
}
