use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use zenith_auth::AuthError;
use zenith_database::{
    MessagingError, NotificationError, OrderError, ProductError, SupportError,
    TutorApplicationError, UserError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        error!(error = ?error, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        let status = match error {
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::AccountDisabled => StatusCode::FORBIDDEN,
            AuthError::UserExists => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::PasswordHash(_) => {
                error!(error = ?error, "auth error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, error.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => Self::not_found(error.to_string()),
            UserError::VerificationNotPending => Self::conflict(error.to_string()),
            UserError::DatabaseError(_) => {
                error!(error = ?error, "user repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::ProductNotFound => Self::not_found(error.to_string()),
            ProductError::NotOwner => Self::forbidden(error.to_string()),
            ProductError::NotPending | ProductError::NotActive | ProductError::AlreadySold => {
                Self::conflict(error.to_string())
            }
            ProductError::ReasonRequired => Self::bad_request(error.to_string()),
            ProductError::DatabaseError(_) => {
                error!(error = ?error, "product repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<TutorApplicationError> for ApiError {
    fn from(error: TutorApplicationError) -> Self {
        match error {
            TutorApplicationError::ApplicationNotFound => Self::not_found(error.to_string()),
            TutorApplicationError::ApplicationAlreadyOpen | TutorApplicationError::NotPending => {
                Self::conflict(error.to_string())
            }
            TutorApplicationError::ReasonRequired => Self::bad_request(error.to_string()),
            TutorApplicationError::DatabaseError(_) => {
                error!(error = ?error, "tutor application repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<SupportError> for ApiError {
    fn from(error: SupportError) -> Self {
        match error {
            SupportError::MessageNotFound => Self::not_found(error.to_string()),
            SupportError::DatabaseError(_) => {
                error!(error = ?error, "support repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(error: OrderError) -> Self {
        match error {
            OrderError::ProductNotFound => Self::not_found(error.to_string()),
            OrderError::ProductNotAvailable | OrderError::CannotBuyOwnListing => {
                Self::conflict(error.to_string())
            }
            OrderError::DatabaseError(_) => {
                error!(error = ?error, "order repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<MessagingError> for ApiError {
    fn from(error: MessagingError) -> Self {
        match error {
            MessagingError::ConversationNotFound | MessagingError::ProductNotFound => {
                Self::not_found(error.to_string())
            }
            MessagingError::ProductNotAvailable | MessagingError::CannotMessageSelf => {
                Self::conflict(error.to_string())
            }
            MessagingError::DatabaseError(_) => {
                error!(error = ?error, "messaging repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}

impl From<NotificationError> for ApiError {
    fn from(error: NotificationError) -> Self {
        match error {
            NotificationError::NotificationNotFound => Self::not_found(error.to_string()),
            NotificationError::DatabaseError(_) => {
                error!(error = ?error, "notification repository error");
                Self::internal_server_error("internal error")
            }
        }
    }
}
