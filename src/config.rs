use std::{env, net::SocketAddr, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
    #[error(transparent)]
    DotEnvError(#[from] dotenvy::Error),
}

#[derive(Clone, Debug)] // Clone needed if passed around, Debug for logging
pub struct Config {
    pub bind_address: SocketAddr,
    /// Base URL of the captioning API, overridable for tests/stubs.
    pub caption_api_url: String,
    pub caption_username: String,
    pub caption_password: String,
    /// Upper bound on one outbound captioning call.
    pub caption_timeout: Duration,
    pub memes_table_name: String,
    pub aws_region: String,
    // Optional endpoint for LocalStack
    pub localstack_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();

        let bind_address_str =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let bind_address = SocketAddr::from_str(&bind_address_str)
            .map_err(|e| ConfigError::InvalidVar("BIND_ADDRESS".into(), e.to_string()))?;

        let caption_api_url = env::var("CAPTION_API_URL")
            .unwrap_or_else(|_| "https://api.imgflip.com".to_string());

        // Credentials are required; the captioning API rejects anonymous calls.
        let caption_username = env::var("CAPTION_API_USERNAME")
            .map_err(|_| ConfigError::MissingVar("CAPTION_API_USERNAME".into()))?;
        let caption_password = env::var("CAPTION_API_PASSWORD")
            .map_err(|_| ConfigError::MissingVar("CAPTION_API_PASSWORD".into()))?;

        let caption_timeout_secs = match env::var("CAPTION_TIMEOUT_SECS") {
            Ok(raw) => u64::from_str(&raw)
                .map_err(|e| ConfigError::InvalidVar("CAPTION_TIMEOUT_SECS".into(), e.to_string()))?,
            Err(_) => 10,
        };

        let memes_table_name =
            env::var("MEMES_TABLE_NAME").unwrap_or_else(|_| "memes".to_string());

        let aws_region =
            env::var("AWS_DEFAULT_REGION").unwrap_or_else(|_| "ca-central-1".to_string());

        // Allow overriding endpoint for localstack/testing
        let localstack_endpoint = env::var("AWS_ENDPOINT_URL").ok(); // Optional

        Ok(Config {
            bind_address,
            caption_api_url,
            caption_username,
            caption_password,
            caption_timeout: Duration::from_secs(caption_timeout_secs),
            memes_table_name,
            aws_region,
            localstack_endpoint,
        })
    }
}
