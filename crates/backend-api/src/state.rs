use sqlx::SqlitePool;
use tracing::warn;
use zenith_auth::{AuthSession, Authenticator, User};
use zenith_config::ListingsConfig;
use zenith_database::{
    ConversationRepository, NotificationKind, NotificationRepository, OrderRepository,
    ProductRepository, SupportMessageRepository, TutorApplicationRepository, UserRepository,
};

use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    authenticator: Authenticator,
    listings: ListingsConfig,
    users: UserRepository,
    products: ProductRepository,
    tutors: TutorApplicationRepository,
    orders: OrderRepository,
    conversations: ConversationRepository,
    support: SupportMessageRepository,
    notifications: NotificationRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool, authenticator: Authenticator, listings: ListingsConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            tutors: TutorApplicationRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            conversations: ConversationRepository::new(pool.clone()),
            support: SupportMessageRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            pool,
            authenticator,
            listings,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn listings(&self) -> &ListingsConfig {
        &self.listings
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn tutors(&self) -> &TutorApplicationRepository {
        &self.tutors
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    pub fn conversations(&self) -> &ConversationRepository {
        &self.conversations
    }

    pub fn support(&self) -> &SupportMessageRepository {
        &self.support
    }

    pub fn notifications(&self) -> &NotificationRepository {
        &self.notifications
    }

    /// Write a feed entry without failing the request that triggered it.
    /// A lost notification is an annoyance; a failed checkout is not.
    pub async fn notify(&self, user_id: i64, kind: NotificationKind, title: &str, body: &str) {
        if let Err(error) = self.notifications.create(user_id, kind, title, body).await {
            warn!(user_id, error = ?error, "failed to write notification");
        }
    }

    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }

    pub async fn authenticate_admin(&self, token: &str) -> Result<User, ApiError> {
        let (user, _) = self.authenticate(token).await?;
        if !user.is_admin() {
            return Err(ApiError::forbidden("administrator access required"));
        }
        Ok(user)
    }
}
