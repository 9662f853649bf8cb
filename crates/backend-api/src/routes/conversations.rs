use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use zenith_database::NotificationKind;

use crate::{
    routes::models::{
        ConversationMessageResponse, ConversationMessagesResponse, ConversationResponse,
        ConversationSummaryResponse, ConversationsResponse,
    },
    util::{clamp_paging, require_bearer},
    ApiError, AppState,
};

#[derive(Debug, Deserialize)]
pub struct StartConversationRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn start_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<StartConversationRequest>,
) -> Result<(StatusCode, Json<ConversationResponse>), ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let conversation = state
        .conversations()
        .start(user.id, &payload.product_id)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(conversation.into())))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConversationsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let conversations = state
        .conversations()
        .list_for_user(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ConversationsResponse {
        conversations: conversations
            .into_iter()
            .map(ConversationSummaryResponse::from)
            .collect(),
    }))
}

pub async fn get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Query(query): Query<MessagesQuery>,
    headers: HeaderMap,
) -> Result<Json<ConversationMessagesResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let conversation = state
        .conversations()
        .find_for_participant(&conversation_id, user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("conversation not found"))?;

    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let messages = state
        .conversations()
        .messages(conversation.id, limit, offset)
        .await
        .map_err(ApiError::from)?;

    // Fetching a thread counts as reading it.
    state
        .conversations()
        .mark_read(conversation.id, user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ConversationMessagesResponse {
        messages: messages
            .into_iter()
            .map(ConversationMessageResponse::from)
            .collect(),
    }))
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ConversationMessageResponse>), ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let body = payload.body.trim();
    if body.is_empty() {
        return Err(ApiError::bad_request("message body must not be empty"));
    }

    let conversation = state
        .conversations()
        .find_for_participant(&conversation_id, user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("conversation not found"))?;

    let message = state
        .conversations()
        .send(conversation.id, user.id, body)
        .await
        .map_err(ApiError::from)?;

    let recipient = if user.id == conversation.buyer_id {
        conversation.seller_id
    } else {
        conversation.buyer_id
    };
    let sender = user.display_name.as_deref().unwrap_or("Someone");
    state
        .notify(
            recipient,
            NotificationKind::NewMessage,
            "New message",
            &format!("{sender} sent you a message."),
        )
        .await;

    Ok((StatusCode::CREATED, Json(message.into())))
}
