mod error;
mod state;
mod util;

pub mod docs;
pub mod routes;

pub use error::ApiError;
pub use state::AppState;
pub use util::require_bearer;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        // Auth routes
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        // Profile routes
        .route("/api/users/me", get(routes::users::get_current_user))
        .route("/api/users/me", patch(routes::users::update_current_user))
        .route("/api/users/me", delete(routes::users::delete_current_user))
        .route(
            "/api/users/me/documents",
            post(routes::users::submit_documents),
        )
        .route(
            "/api/users/me/products",
            get(routes::products::list_my_products),
        )
        // Listing routes
        .route("/api/products", get(routes::products::browse_products))
        .route("/api/products", post(routes::products::create_product))
        .route("/api/products/:product_id", get(routes::products::get_product))
        .route(
            "/api/products/:product_id",
            patch(routes::products::update_product),
        )
        .route(
            "/api/products/:product_id",
            delete(routes::products::delete_product),
        )
        .route(
            "/api/products/:product_id/sold",
            post(routes::products::mark_product_sold),
        )
        // Tutor routes
        .route("/api/tutors", get(routes::tutors::list_tutors))
        .route(
            "/api/tutors/applications",
            post(routes::tutors::submit_application),
        )
        .route(
            "/api/tutors/applications/me",
            get(routes::tutors::my_application),
        )
        // Order routes
        .route("/api/orders", post(routes::orders::checkout))
        .route("/api/orders/purchases", get(routes::orders::list_purchases))
        .route("/api/orders/sales", get(routes::orders::list_sales))
        // Conversation routes
        .route(
            "/api/conversations",
            post(routes::conversations::start_conversation),
        )
        .route(
            "/api/conversations",
            get(routes::conversations::list_conversations),
        )
        .route(
            "/api/conversations/:conversation_id/messages",
            get(routes::conversations::get_messages),
        )
        .route(
            "/api/conversations/:conversation_id/messages",
            post(routes::conversations::send_message),
        )
        // Notification routes
        .route(
            "/api/notifications",
            get(routes::notifications::list_notifications),
        )
        .route(
            "/api/notifications/unread-count",
            get(routes::notifications::unread_count),
        )
        .route(
            "/api/notifications/:notification_id/read",
            post(routes::notifications::mark_notification_read),
        )
        .route(
            "/api/notifications/read-all",
            post(routes::notifications::mark_all_read),
        )
        // Support routes
        .route(
            "/api/support/messages",
            post(routes::support::file_support_message),
        )
        // Admin routes
        .route(
            "/api/admin/notifications",
            get(routes::admin::admin_notifications),
        )
        .route(
            "/api/admin/products",
            get(routes::admin::list_products_for_review),
        )
        .route(
            "/api/admin/products/:product_id/approve",
            post(routes::admin::approve_product),
        )
        .route(
            "/api/admin/products/:product_id/reject",
            post(routes::admin::reject_product),
        )
        .route(
            "/api/admin/tutor-applications",
            get(routes::admin::list_applications),
        )
        .route(
            "/api/admin/tutor-applications/:application_id/approve",
            post(routes::admin::approve_application),
        )
        .route(
            "/api/admin/tutor-applications/:application_id/reject",
            post(routes::admin::reject_application),
        )
        .route(
            "/api/admin/verifications",
            get(routes::admin::list_verifications),
        )
        .route(
            "/api/admin/verifications/:user_id",
            post(routes::admin::review_verification),
        )
        .route("/api/admin/support", get(routes::admin::list_support_messages))
        .route(
            "/api/admin/support/:message_id/read",
            post(routes::admin::mark_support_read),
        )
        .route("/api/admin/users/:user_id", delete(routes::admin::delete_user))
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(state)
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
