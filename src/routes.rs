use crate::{
    AppState,
    handlers, // Import handlers module
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router and associates routes with handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/upload", post(handlers::upload_meme)) // Use handlers::...
        .route("/getmemes", get(handlers::get_memes))
        .route("/bestmeme", get(handlers::best_meme))
        // Middleware Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB is plenty for text payloads
        .with_state(state) // Pass the application state
}
