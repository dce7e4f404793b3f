//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health` — reports version and chat log store connectivity.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("chat log store ping failed: {e}");
            false
        }
    };

    Json(HealthResponse {
        version: helpline_core::version().to_string(),
        store_connected,
        faq_entries: state.chat.faq().len(),
    })
}
