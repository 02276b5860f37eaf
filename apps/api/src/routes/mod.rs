pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::compliance::handlers as compliance;
use crate::documents::handlers as documents;
use crate::enhancement::handlers as enhancement;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let output = ServeDir::new(&state.config.output_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/v1/parse", post(documents::handle_parse))
        .route("/api/v1/generate", post(documents::handle_generate))
        // Scoring
        .route("/api/v1/analyze", post(compliance::handle_analyze))
        .route("/api/v1/score", post(scoring::handle_score))
        // Enhancement
        .route("/api/v1/enhance", post(enhancement::handle_enhance))
        .route("/api/v1/chat", post(enhancement::handle_chat))
        .nest_service("/output", output)
        .layer(body_limit)
        .with_state(state)
}
