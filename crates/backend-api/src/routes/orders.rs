use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use zenith_database::NotificationKind;

use crate::{
    routes::models::{OrderResponse, OrdersResponse},
    util::require_bearer,
    ApiError, AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Public id of the listing being purchased.
    pub product_id: String,
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    security(("bearerAuth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order completed and listing marked sold", body = OrderResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Listing is not available for purchase", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let order = state
        .orders()
        .checkout(user.id, &payload.product_id)
        .await
        .map_err(ApiError::from)?;

    if let Ok(Some(product)) = state.products().find_by_id(order.product_id).await {
        state
            .notify(
                order.seller_id,
                NotificationKind::ProductSold,
                "Listing sold",
                &format!("\"{}\" was purchased.", product.title),
            )
            .await;
    }

    Ok((StatusCode::CREATED, Json(order.into())))
}

#[utoipa::path(
    get,
    path = "/api/orders/purchases",
    tag = "Orders",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Orders the caller placed, newest first", body = OrdersResponse)
    )
)]
pub async fn list_purchases(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrdersResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let orders = state
        .orders()
        .list_by_buyer(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/orders/sales",
    tag = "Orders",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Orders for listings the caller sold, newest first", body = OrdersResponse)
    )
)]
pub async fn list_sales(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrdersResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let orders = state
        .orders()
        .list_by_seller(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}
