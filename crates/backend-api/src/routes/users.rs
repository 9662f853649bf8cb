use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use zenith_database::UpdateUserRequest;

use crate::{routes::models::UserProfile, util::require_bearer, ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitDocumentsRequest {
    pub id_document_url: String,
    pub student_document_url: String,
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let profile = state
        .users()
        .find_by_id(user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(profile.into()))
}

#[utoipa::path(
    patch,
    path = "/api/users/me",
    tag = "Users",
    security(("bearerAuth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user profile", body = UserProfile),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let update = UpdateUserRequest {
        display_name: payload.display_name,
        campus: payload.campus,
        bio: payload.bio,
        avatar_url: payload.avatar_url,
    };

    let updated = state
        .users()
        .update_profile(user.id, &update)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    post,
    path = "/api/users/me/documents",
    tag = "Users",
    security(("bearerAuth" = [])),
    request_body = SubmitDocumentsRequest,
    responses(
        (status = 200, description = "Documents submitted for verification", body = UserProfile),
        (status = 400, description = "Invalid document payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmitDocumentsRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let id_document_url = payload.id_document_url.trim();
    let student_document_url = payload.student_document_url.trim();
    if id_document_url.is_empty() || student_document_url.is_empty() {
        return Err(ApiError::bad_request(
            "both document urls are required for verification",
        ));
    }

    let updated = state
        .users()
        .submit_verification_documents(user.id, id_document_url, student_document_url)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = "Users",
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    state
        .users()
        .delete_account(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
