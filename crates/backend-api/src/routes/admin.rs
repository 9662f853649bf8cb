//! Administrative review surface. Every handler here authenticates through
//! [`AppState::authenticate_admin`], so a valid session with a non-admin role
//! uniformly gets a 403.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use zenith_database::{ApplicationStatus, NotificationKind, ProductStatus, SupportPriority};

use crate::{
    routes::models::{
        ProductResponse, ProductsResponse, SupportMessageResponse, SupportMessagesResponse,
        TutorApplicationResponse, TutorApplicationsResponse, UserSummary,
    },
    util::{clamp_paging, require_bearer},
    ApiError, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewQueueQuery {
    /// Lifecycle status to filter on. Defaults to `pending`.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectProductRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveApplicationRequest {
    #[serde(default)]
    pub verification_notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectApplicationRequest {
    pub reason: String,
    #[serde(default)]
    pub verification_notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewVerificationRequest {
    pub approved: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerificationQueue {
    pub count: i64,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductQueue {
    pub count: i64,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupportInbox {
    pub unread_count: i64,
    pub urgent: Vec<SupportMessageResponse>,
    pub high: Vec<SupportMessageResponse>,
    pub normal: Vec<SupportMessageResponse>,
    pub low: Vec<SupportMessageResponse>,
}

/// Everything waiting on an administrator, gathered into one payload so the
/// review dashboard needs a single round trip.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminNotificationsResponse {
    pub pending_verifications: VerificationQueue,
    pub pending_products: ProductQueue,
    pub support_messages: SupportInbox,
    /// Sum of the three queue counts.
    pub total: i64,
}

#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    tag = "Admin",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Aggregated review queues", body = AdminNotificationsResponse),
        (status = 403, description = "Caller is not an administrator", body = crate::error::ErrorResponse)
    )
)]
pub async fn admin_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminNotificationsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    // Counts are the true queue sizes; the embedded lists are capped at one
    // page so a backlog cannot blow up the dashboard payload.
    let cap = i64::from(state.listings().default_page_size);

    let verification_count = state
        .users()
        .count_pending_verifications()
        .await
        .map_err(ApiError::from)?;
    let mut pending_users = state
        .users()
        .pending_verifications()
        .await
        .map_err(ApiError::from)?;
    pending_users.truncate(cap as usize);

    let product_count = state.products().count_pending().await.map_err(ApiError::from)?;
    let pending_products = state
        .products()
        .list_by_status(ProductStatus::Pending, cap, 0)
        .await
        .map_err(ApiError::from)?;

    let unread_count = state.support().count_unread().await.map_err(ApiError::from)?;
    let unread = state.support().list_unread().await.map_err(ApiError::from)?;

    let mut urgent = Vec::new();
    let mut high = Vec::new();
    let mut normal = Vec::new();
    let mut low = Vec::new();
    for message in unread {
        let bucket = match message.priority {
            SupportPriority::Urgent => &mut urgent,
            SupportPriority::High => &mut high,
            SupportPriority::Normal => &mut normal,
            SupportPriority::Low => &mut low,
        };
        bucket.push(SupportMessageResponse::from(message));
    }

    let total = verification_count + product_count + unread_count;

    Ok(Json(AdminNotificationsResponse {
        pending_verifications: VerificationQueue {
            count: verification_count,
            users: pending_users.into_iter().map(UserSummary::from).collect(),
        },
        pending_products: ProductQueue {
            count: product_count,
            products: pending_products
                .into_iter()
                .map(ProductResponse::from)
                .collect(),
        },
        support_messages: SupportInbox {
            unread_count,
            urgent,
            high,
            normal,
            low,
        },
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(ReviewQueueQuery),
    responses(
        (status = 200, description = "Listings in the requested status, newest first", body = ProductsResponse),
        (status = 403, description = "Caller is not an administrator", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_products_for_review(
    State(state): State<AppState>,
    Query(query): Query<ReviewQueueQuery>,
    headers: HeaderMap,
) -> Result<Json<ProductsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let status = query
        .status
        .as_deref()
        .map(ProductStatus::from)
        .unwrap_or(ProductStatus::Pending);
    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let products = state
        .products()
        .list_by_status(status, limit, offset)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/{product_id}/approve",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("product_id" = String, Path, description = "Public listing id")),
    responses(
        (status = 200, description = "Listing published", body = ProductResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Listing is not pending review", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProductResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let product = state
        .products()
        .approve(&product_id)
        .await
        .map_err(ApiError::from)?;

    state
        .notify(
            product.seller_id,
            NotificationKind::ProductApproved,
            "Listing approved",
            &format!("\"{}\" is now live.", product.title),
        )
        .await;

    Ok(Json(product.into()))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/{product_id}/reject",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("product_id" = String, Path, description = "Public listing id")),
    request_body = RejectProductRequest,
    responses(
        (status = 200, description = "Listing rejected", body = ProductResponse),
        (status = 400, description = "A rejection reason is required", body = crate::error::ErrorResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Listing is not pending review", body = crate::error::ErrorResponse)
    )
)]
pub async fn reject_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<RejectProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let reason = payload.reason.trim();
    let product = state
        .products()
        .reject(&product_id, reason)
        .await
        .map_err(ApiError::from)?;

    state
        .notify(
            product.seller_id,
            NotificationKind::ProductRejected,
            "Listing rejected",
            &format!("\"{}\" was rejected: {reason}", product.title),
        )
        .await;

    Ok(Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/tutor-applications",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(ReviewQueueQuery),
    responses(
        (status = 200, description = "Applications in the requested status, newest first", body = TutorApplicationsResponse),
        (status = 403, description = "Caller is not an administrator", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ReviewQueueQuery>,
    headers: HeaderMap,
) -> Result<Json<TutorApplicationsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let status = query
        .status
        .as_deref()
        .map(ApplicationStatus::from)
        .unwrap_or(ApplicationStatus::Pending);
    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let applications = state
        .tutors()
        .list_by_status(status, limit, offset)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TutorApplicationsResponse {
        applications: applications
            .into_iter()
            .map(TutorApplicationResponse::from)
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/tutor-applications/{application_id}/approve",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("application_id" = String, Path, description = "Public application id")),
    request_body = ApproveApplicationRequest,
    responses(
        (status = 200, description = "Application approved and tutor flag set", body = TutorApplicationResponse),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Application is not pending review", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_application(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ApproveApplicationRequest>,
) -> Result<Json<TutorApplicationResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let application = state
        .tutors()
        .approve(&application_id, payload.verification_notes.as_deref())
        .await
        .map_err(ApiError::from)?;

    state
        .notify(
            application.user_id,
            NotificationKind::TutorApproved,
            "Tutor application approved",
            "You are now listed in the tutor directory.",
        )
        .await;

    Ok(Json(application.into()))
}

#[utoipa::path(
    post,
    path = "/api/admin/tutor-applications/{application_id}/reject",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("application_id" = String, Path, description = "Public application id")),
    request_body = RejectApplicationRequest,
    responses(
        (status = 200, description = "Application rejected", body = TutorApplicationResponse),
        (status = 400, description = "A rejection reason is required", body = crate::error::ErrorResponse),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Application is not pending review", body = crate::error::ErrorResponse)
    )
)]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<RejectApplicationRequest>,
) -> Result<Json<TutorApplicationResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let reason = payload.reason.trim();
    let application = state
        .tutors()
        .reject(&application_id, reason, payload.verification_notes.as_deref())
        .await
        .map_err(ApiError::from)?;

    state
        .notify(
            application.user_id,
            NotificationKind::TutorRejected,
            "Tutor application rejected",
            &format!("Your application was rejected: {reason}"),
        )
        .await;

    Ok(Json(application.into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/verifications",
    tag = "Admin",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Users waiting on identity review, newest first", body = VerificationQueue),
        (status = 403, description = "Caller is not an administrator", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_verifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerificationQueue>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let count = state
        .users()
        .count_pending_verifications()
        .await
        .map_err(ApiError::from)?;
    let users = state
        .users()
        .pending_verifications()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(VerificationQueue {
        count,
        users: users.into_iter().map(UserSummary::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/verifications/{user_id}",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    request_body = ReviewVerificationRequest,
    responses(
        (status = 200, description = "Review recorded", body = UserSummary),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 409, description = "No verification is pending for this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn review_verification(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ReviewVerificationRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let user = state
        .users()
        .find_by_public_id(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let reviewed = state
        .users()
        .review_verification(user.id, payload.approved, payload.notes.as_deref())
        .await
        .map_err(ApiError::from)?;

    let (kind, title, body) = if payload.approved {
        (
            NotificationKind::VerificationApproved,
            "Student verification approved",
            "Your student documents were accepted.",
        )
    } else {
        (
            NotificationKind::VerificationRejected,
            "Student verification rejected",
            "Your student documents were not accepted. You can upload new documents at any time.",
        )
    };
    state.notify(reviewed.id, kind, title, body).await;

    Ok(Json(reviewed.into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/support",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Support messages, newest first", body = SupportMessagesResponse),
        (status = 403, description = "Caller is not an administrator", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_support_messages(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Json<SupportMessagesResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let messages = state
        .support()
        .list(limit, offset)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SupportMessagesResponse {
        messages: messages
            .into_iter()
            .map(SupportMessageResponse::from)
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/support/{message_id}/read",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("message_id" = i64, Path, description = "Support message id")),
    responses(
        (status = 204, description = "Message marked as handled"),
        (status = 404, description = "Message not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn mark_support_read(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    state
        .support()
        .mark_read(message_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = "Admin",
    security(("bearerAuth" = [])),
    params(("user_id" = String, Path, description = "Public user id")),
    responses(
        (status = 204, description = "Account soft deleted and listings removed"),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    state.authenticate_admin(&token).await?;

    let user = state
        .users()
        .find_by_public_id(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    state
        .users()
        .delete_account(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
