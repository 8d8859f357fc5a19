//! Rate-limited HTTP gateway in front of a chat-completion provider for
//! the LettrBlack study assistant.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod upstream;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{chat_handler, health_handler, metrics_handler};
use crate::state::AppState;

// Router with all application routes and shared state
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/ai-chat", post(chat_handler))
        .with_state(state)
}
