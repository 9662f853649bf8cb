use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use zenith_database::{
    CreateProductRequest, ProductCategory, ProductCondition, ProductFilter, ProductStatus,
    UpdateProductRequest,
};

use crate::{
    routes::models::{ProductResponse, ProductsResponse},
    util::{clamp_paging, require_bearer},
    ApiError, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub max_price_cents: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateListingRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Active listings matching the filter", body = ProductsResponse)
    )
)]
pub async fn browse_products(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let (limit, offset) = clamp_paging(query.limit, query.offset, state.listings());

    let filter = ProductFilter {
        category: query.category.as_deref().map(ProductCategory::from),
        search: query.search.filter(|term| !term.trim().is_empty()),
        max_price_cents: query.max_price_cents,
        limit,
        offset,
    };

    let products = state
        .products()
        .list_active(&filter)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(("product_id" = String, Path, description = "Public listing id")),
    responses(
        (status = 200, description = "Listing details", body = ProductResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products()
        .find_by_public_id(&product_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("product not found"))?;

    // Pending and rejected listings stay hidden from everyone except the
    // seller and the review team. Sold listings remain fetchable so order
    // history links keep resolving.
    if !matches!(product.status, ProductStatus::Active | ProductStatus::Sold) {
        let allowed = match require_bearer(&headers) {
            Ok(token) => match state.authenticate(&token).await {
                Ok((user, _)) => user.id == product.seller_id || user.is_admin(),
                Err(_) => false,
            },
            Err(_) => false,
        };
        if !allowed {
            return Err(ApiError::not_found("product not found"));
        }
    }

    Ok(Json(product.into()))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    security(("bearerAuth" = [])),
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing created and queued for review", body = ProductResponse),
        (status = 400, description = "Invalid listing payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }
    if payload.price_cents < 0 {
        return Err(ApiError::bad_request("price must not be negative"));
    }

    let request = CreateProductRequest {
        title: title.to_string(),
        description: payload.description.unwrap_or_default(),
        price_cents: payload.price_cents,
        category: payload
            .category
            .as_deref()
            .map(ProductCategory::from)
            .unwrap_or(ProductCategory::Other),
        condition: payload
            .condition
            .as_deref()
            .map(ProductCondition::from)
            .unwrap_or(ProductCondition::Good),
        image_url: payload.image_url,
    };

    let product = state
        .products()
        .create(user.id, &request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    patch,
    path = "/api/products/{product_id}",
    tag = "Products",
    security(("bearerAuth" = [])),
    params(("product_id" = String, Path, description = "Public listing id")),
    request_body = UpdateListingRequest,
    responses(
        (status = 200, description = "Listing updated and returned to review", body = ProductResponse),
        (status = 400, description = "Invalid listing payload", body = crate::error::ErrorResponse),
        (status = 403, description = "Listing belongs to another seller", body = crate::error::ErrorResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Listing already sold", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateListingRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    if let Some(title) = payload.title.as_deref() {
        if title.trim().is_empty() {
            return Err(ApiError::bad_request("title must not be empty"));
        }
    }
    if matches!(payload.price_cents, Some(price) if price < 0) {
        return Err(ApiError::bad_request("price must not be negative"));
    }

    let request = UpdateProductRequest {
        title: payload.title.map(|title| title.trim().to_string()),
        description: payload.description,
        price_cents: payload.price_cents,
        category: payload.category.as_deref().map(ProductCategory::from),
        condition: payload.condition.as_deref().map(ProductCondition::from),
        image_url: payload.image_url,
    };

    let product = state
        .products()
        .update_listing(user.id, &product_id, &request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/api/products/{product_id}",
    tag = "Products",
    security(("bearerAuth" = [])),
    params(("product_id" = String, Path, description = "Public listing id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 403, description = "Listing belongs to another seller", body = crate::error::ErrorResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Sold listings cannot be deleted", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    state
        .products()
        .delete_listing(user.id, &product_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/products/{product_id}/sold",
    tag = "Products",
    security(("bearerAuth" = [])),
    params(("product_id" = String, Path, description = "Public listing id")),
    responses(
        (status = 200, description = "Listing marked as sold", body = ProductResponse),
        (status = 403, description = "Listing belongs to another seller", body = crate::error::ErrorResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Listing is not active", body = crate::error::ErrorResponse)
    )
)]
pub async fn mark_product_sold(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ProductResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let product = state
        .products()
        .mark_sold(user.id, &product_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/api/users/me/products",
    tag = "Products",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All listings owned by the caller", body = ProductsResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_my_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProductsResponse>, ApiError> {
    let token = require_bearer(&headers)?;
    let (user, _) = state.authenticate(&token).await?;

    let products = state
        .products()
        .list_by_seller(user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}
