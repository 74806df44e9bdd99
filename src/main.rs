use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aws_clients;
mod caption;
mod config;
mod domain;
mod errors;
mod handlers;
mod mapper;
mod models;
mod repositories;
mod routes;
mod startup;

use crate::aws_clients::{create_dynamodb_client, create_sdk_config};
use crate::caption::ImgflipClient;
use crate::config::Config;
use crate::domain::{CaptionApi, MemeRepository};
use crate::errors::AppError;
use crate::repositories::DynamoDbMemeRepository;

/// AppState holds shared resources for the web server, initialized once at
/// startup. Per-request data never lives here.
pub struct AppState {
    pub meme_repo: Arc<dyn MemeRepository>,
    pub captioner: Arc<dyn CaptionApi>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "meme_gateway=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = Config::load()?;
    tracing::info!(bind_address = %config.bind_address, table = %config.memes_table_name, "Configuration loaded");

    // --- AWS Client Initialization ---
    tracing::info!("Initializing AWS DynamoDB client...");
    let sdk_config = create_sdk_config(&config).await?;
    let db_client = create_dynamodb_client(&sdk_config);

    // Table must exist before the server accepts traffic.
    startup::init_resources(&db_client, &config.memes_table_name).await?;

    // --- Captioning Client ---
    let captioner = ImgflipClient::new(
        config.caption_api_url.clone(),
        config.caption_username.clone(),
        config.caption_password.clone(),
        config.caption_timeout,
    )?;

    // --- Application State ---
    let state = Arc::new(AppState {
        meme_repo: Arc::new(DynamoDbMemeRepository::new(
            db_client,
            config.memes_table_name.clone(),
        )),
        captioner: Arc::new(captioner),
    });

    // --- Router Definition ---
    let app = routes::create_router(state);

    // --- Server Startup ---
    tracing::info!("Server listening on http://{}", config.bind_address);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
