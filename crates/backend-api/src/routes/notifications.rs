use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    routes::models::{NotificationResponse, NotificationsResponse},
    util::{clamp_paging, require_bearer},
    ApiError, AppState,
};

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated_count: u32,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let notifications = state
        .notifications()
        .list_for_user(user.id, query.unread_only, limit, offset)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(NotificationsResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    }))
}

pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let unread_count = state
        .notifications()
        .unread_count(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UnreadCountResponse { unread_count }))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    state
        .notifications()
        .mark_read(notification_id, user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MarkAllReadResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let updated_count = state
        .notifications()
        .mark_all_read(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(MarkAllReadResponse { updated_count }))
}
