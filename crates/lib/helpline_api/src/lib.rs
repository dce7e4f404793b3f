//! # helpline_api
//!
//! HTTP API library for Helpline.

pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use helpline_core::chat::ChatService;
use helpline_core::chat_log::ChatLogStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{chat, health};

/// Route path for the chat endpoint.
pub const POST_CHAT: &str = "/chat";

/// Route path for the health endpoint.
pub const GET_API_HEALTH: &str = "/api/health";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Decision chain with its injected providers.
    pub chat: Arc<ChatService>,
    /// Chat log store (also held by `chat`), used for health checks.
    pub store: Arc<dyn ChatLogStore>,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(POST_CHAT, post(chat::chat_handler))
        .route(GET_API_HEALTH, get(health::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
