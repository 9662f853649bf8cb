use axum::{
    extract::{Query, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use zenith_database::CreateTutorApplicationRequest;

use crate::{
    routes::models::{TutorApplicationResponse, TutorProfileResponse, TutorsResponse},
    util::{clamp_paging, require_bearer},
    ApiError, AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyRequest {
    pub subjects: String,
    #[serde(default)]
    pub qualifications: Option<String>,
    pub hourly_rate_cents: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DirectoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/tutors/applications",
    tag = "Tutors",
    security(("bearerAuth" = [])),
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted for review", body = TutorApplicationResponse),
        (status = 400, description = "Invalid application payload", body = crate::error::ErrorResponse),
        (status = 409, description = "An application is already open or approved", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<TutorApplicationResponse>), ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let subjects = payload.subjects.trim();
    if subjects.is_empty() {
        return Err(ApiError::bad_request("subjects must not be empty"));
    }
    if payload.hourly_rate_cents < 0 {
        return Err(ApiError::bad_request("hourly rate must not be negative"));
    }

    let request = CreateTutorApplicationRequest {
        subjects: subjects.to_string(),
        qualifications: payload
            .qualifications
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        hourly_rate_cents: payload.hourly_rate_cents,
    };

    let application = state
        .tutors()
        .create(user.id, &request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(application.into())))
}

#[utoipa::path(
    get,
    path = "/api/tutors/applications/me",
    tag = "Tutors",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The caller's most recent application", body = TutorApplicationResponse),
        (status = 404, description = "No application on file", body = crate::error::ErrorResponse)
    )
)]
pub async fn my_application(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TutorApplicationResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let application = state
        .tutors()
        .find_latest_for_user(user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("no tutor application on file"))?;

    Ok(Json(application.into()))
}

#[utoipa::path(
    get,
    path = "/api/tutors",
    tag = "Tutors",
    params(DirectoryQuery),
    responses(
        (status = 200, description = "Approved tutors, newest first", body = TutorsResponse)
    )
)]
pub async fn list_tutors(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<TutorsResponse>, ApiError> {
    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let tutors = state
        .tutors()
        .list_approved_tutors(limit, offset)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TutorsResponse {
        tutors: tutors.into_iter().map(TutorProfileResponse::from).collect(),
    }))
}
