/// Chatbot endpoint
///
/// # Endpoints
///
/// - `POST /v1/chatbot/message` - Get a canned response for a user message

use crate::{
    app::AppState,
    chatbot::{respond, BotReply},
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Json};
use serde::Deserialize;

/// Chat message request
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// The user's message
    pub message: String,
}

/// Reply to a chat message
///
/// Keyword-matches the message against fixed categories and returns one
/// canned response; no conversation state is kept.
///
/// # Errors
///
/// - `400 Bad Request`: Empty message
pub async fn message(
    State(_state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<Json<ApiResponse<BotReply>>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let reply = respond(&req.message);

    Ok(Json(ApiResponse::new("Reply generated", reply)))
}
