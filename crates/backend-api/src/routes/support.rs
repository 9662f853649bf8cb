use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use zenith_database::{CreateSupportMessageRequest, SupportPriority};

use crate::{routes::models::SupportMessageResponse, util::require_bearer, ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct FileSupportMessageRequest {
    /// Reply address. Optional for authenticated callers, who default to
    /// their account email.
    #[serde(default)]
    pub email: Option<String>,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub priority: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/support/messages",
    tag = "Support",
    request_body = FileSupportMessageRequest,
    responses(
        (status = 201, description = "Support message filed", body = SupportMessageResponse),
        (status = 400, description = "Invalid support payload", body = crate::error::ErrorResponse)
    )
)]
pub async fn file_support_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<FileSupportMessageRequest>,
) -> Result<(StatusCode, Json<SupportMessageResponse>), ApiError> {
    // Support accepts anonymous mail, so a bearer token is optional here.
    // A present but invalid token is still rejected rather than silently
    // downgraded to anonymous.
    let user = match require_bearer(&headers) {
        Ok(token) => Some(state.authenticate(&token).await?.0),
        Err(_) => None,
    };

    let subject = payload.subject.trim();
    if subject.is_empty() {
        return Err(ApiError::bad_request("subject must not be empty"));
    }
    let body = payload.body.trim();
    if body.is_empty() {
        return Err(ApiError::bad_request("message body must not be empty"));
    }

    let email = payload
        .email
        .map(|email| email.trim().to_ascii_lowercase())
        .filter(|email| !email.is_empty())
        .or_else(|| user.as_ref().and_then(|user| user.email.clone()))
        .ok_or_else(|| ApiError::bad_request("a reply email address is required"))?;
    if !email.contains('@') {
        return Err(ApiError::bad_request("invalid email address"));
    }

    let request = CreateSupportMessageRequest {
        user_id: user.as_ref().map(|user| user.id),
        email,
        subject: subject.to_string(),
        body: body.to_string(),
        priority: payload
            .priority
            .as_deref()
            .map(SupportPriority::from)
            .unwrap_or(SupportPriority::Normal),
    };

    let message = state
        .support()
        .create(&request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(message.into())))
}
