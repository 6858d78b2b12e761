pub mod body;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::challenge::handlers::handle_generate_challenge;
use crate::extraction::handlers::{handle_extract_text, handle_extract_text_batch};
use crate::formatting::handlers::handle_format_text;
use crate::state::AppState;
use crate::tech_stack::handlers::handle_extract_tech_stack;
use crate::translation::handlers::handle_translate_text;

pub fn build_router(state: AppState) -> Router {
    // Leave headroom above the upload limit so oversized files reach the
    // extractor and get its structured size error instead of a bare 413.
    let body_limit = state.config.max_upload_bytes().saturating_mul(2);

    Router::new()
        .route("/health", get(health::health_handler))
        // Pipeline stages, in the order clients chain them
        .route("/api/extract-text", post(handle_extract_text))
        .route("/api/extract-text/batch", post(handle_extract_text_batch))
        .route("/api/translate-text", post(handle_translate_text))
        .route("/api/format-text", post(handle_format_text))
        .route("/api/extract-tech-stack", post(handle_extract_tech_stack))
        .route("/api/generate-challenge", post(handle_generate_challenge))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
