use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::users::get_current_user,
        crate::routes::users::update_current_user,
        crate::routes::users::submit_documents,
        crate::routes::users::delete_current_user,
        crate::routes::products::browse_products,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        crate::routes::products::mark_product_sold,
        crate::routes::products::list_my_products,
        crate::routes::tutors::submit_application,
        crate::routes::tutors::my_application,
        crate::routes::tutors::list_tutors,
        crate::routes::orders::checkout,
        crate::routes::orders::list_purchases,
        crate::routes::orders::list_sales,
        crate::routes::support::file_support_message,
        crate::routes::admin::admin_notifications,
        crate::routes::admin::list_products_for_review,
        crate::routes::admin::approve_product,
        crate::routes::admin::reject_product,
        crate::routes::admin::list_applications,
        crate::routes::admin::approve_application,
        crate::routes::admin::reject_application,
        crate::routes::admin::list_verifications,
        crate::routes::admin::review_verification,
        crate::routes::admin::list_support_messages,
        crate::routes::admin::mark_support_read,
        crate::routes::admin::delete_user
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::auth::RegisterRequest,
            crate::routes::auth::LoginRequest,
            crate::routes::auth::SessionResponse,
            crate::routes::auth::UserResponse,
            crate::routes::users::UpdateProfileRequest,
            crate::routes::users::SubmitDocumentsRequest,
            crate::routes::products::CreateListingRequest,
            crate::routes::products::UpdateListingRequest,
            crate::routes::tutors::ApplyRequest,
            crate::routes::orders::CheckoutRequest,
            crate::routes::support::FileSupportMessageRequest,
            crate::routes::admin::RejectProductRequest,
            crate::routes::admin::ApproveApplicationRequest,
            crate::routes::admin::RejectApplicationRequest,
            crate::routes::admin::ReviewVerificationRequest,
            crate::routes::admin::VerificationQueue,
            crate::routes::admin::ProductQueue,
            crate::routes::admin::SupportInbox,
            crate::routes::admin::AdminNotificationsResponse,
            crate::routes::models::UserProfile,
            crate::routes::models::UserSummary,
            crate::routes::models::ProductResponse,
            crate::routes::models::ProductsResponse,
            crate::routes::models::TutorApplicationResponse,
            crate::routes::models::TutorApplicationsResponse,
            crate::routes::models::TutorProfileResponse,
            crate::routes::models::TutorsResponse,
            crate::routes::models::OrderResponse,
            crate::routes::models::OrdersResponse,
            crate::routes::models::SupportMessageResponse,
            crate::routes::models::SupportMessagesResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Auth", description = "Registration and session management"),
        (name = "Users", description = "Profile and verification documents"),
        (name = "Products", description = "Marketplace listings"),
        (name = "Tutors", description = "Tutor applications and directory"),
        (name = "Orders", description = "Checkout and order history"),
        (name = "Support", description = "Support inbox"),
        (name = "Admin", description = "Review queues and moderation")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        let schemes = &mut components.security_schemes;

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("Bearer".to_string());
        }

        schemes.insert("bearerAuth".to_string(), scheme);
    }
}
