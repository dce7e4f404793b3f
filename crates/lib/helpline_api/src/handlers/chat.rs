//! Chat request handler.

use axum::Json;
use axum::extract::State;
use helpline_core::chat::ChatRequest;

use crate::AppState;
use crate::error::AppResult;
use crate::models::ChatResponse;

/// `POST /chat` — answer a customer message via FAQ, AI, or escalation.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let outcome = state.chat.handle(&body).await?;
    Ok(Json(ChatResponse {
        reply: outcome.reply,
    }))
}
