//! User repository for database operations.

use crate::entities::user::{UserRole, UserStatus};
use crate::entities::{UpdateUserRequest, User};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const USER_COLUMNS: &str = "id, public_id, email, display_name, campus, bio, avatar_url, role, status, id_document_url, student_document_url, documents_uploaded, admin_verified, verified_tutor, verification_notes, created_at, updated_at, last_login_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> User {
        User {
            id: row.get("id"),
            public_id: row.get("public_id"),
            email: row.get("email"),
            display_name: row.get("display_name"),
            campus: row.get("campus"),
            bio: row.get("bio"),
            avatar_url: row.get("avatar_url"),
            role: UserRole::from(row.get::<String, _>("role").as_str()),
            status: UserStatus::from(row.get::<String, _>("status").as_str()),
            id_document_url: row.get("id_document_url"),
            student_document_url: row.get("student_document_url"),
            documents_uploaded: row.get("documents_uploaded"),
            admin_verified: row.get("admin_verified"),
            verified_tutor: row.get("verified_tutor"),
            verification_notes: row.get("verification_notes"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            last_login_at: row.get("last_login_at"),
        }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND status != 'deleted'"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Find user by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = ? AND status != 'deleted'"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND status != 'deleted'"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Update profile fields
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: &UpdateUserRequest,
    ) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();

        // Build dynamic update query based on provided fields
        let mut query_parts = Vec::new();
        let mut values = Vec::new();

        if let Some(ref display_name) = request.display_name {
            query_parts.push("display_name = ?");
            values.push(display_name.clone());
        }

        if let Some(ref campus) = request.campus {
            query_parts.push("campus = ?");
            values.push(campus.clone());
        }

        if let Some(ref bio) = request.bio {
            query_parts.push("bio = ?");
            values.push(bio.clone());
        }

        if let Some(ref avatar_url) = request.avatar_url {
            query_parts.push("avatar_url = ?");
            values.push(avatar_url.clone());
        }

        if query_parts.is_empty() {
            return self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound);
        }

        query_parts.push("updated_at = ?");
        values.push(now);

        let set_clause = query_parts.join(", ");
        let query_str = format!(
            "UPDATE users SET {} WHERE id = ? AND status != 'deleted'",
            set_clause
        );

        let mut query = sqlx::query(&query_str);
        for value in values {
            query = query.bind(value);
        }
        query = query.bind(user_id);

        query
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound)
    }

    /// Record uploaded verification documents and queue the user for review.
    /// A re-submission always clears any earlier verification decision.
    pub async fn submit_verification_documents(
        &self,
        user_id: i64,
        id_document_url: &str,
        student_document_url: &str,
    ) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET id_document_url = ?, student_document_url = ?, documents_uploaded = true, admin_verified = false, verification_notes = NULL, updated_at = ? WHERE id = ? AND status != 'deleted'"
        )
        .bind(id_document_url)
        .bind(student_document_url)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound)
    }

    /// Review uploaded documents. Only users with documents awaiting review
    /// can be decided on; anything else is reported as not pending.
    pub async fn review_verification(
        &self,
        user_id: i64,
        approved: bool,
        notes: Option<&str>,
    ) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET admin_verified = ?, documents_uploaded = ?, verification_notes = ?, updated_at = ? WHERE id = ? AND status != 'deleted' AND documents_uploaded = true AND admin_verified = false"
        )
        .bind(approved)
        // an approval consumes the pending flag either way; a rejection
        // requires fresh documents before the user shows up again
        .bind(false)
        .bind(notes)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(user_id).await? {
                Some(_) => Err(UserError::VerificationNotPending),
                None => Err(UserError::UserNotFound),
            };
        }

        self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound)
    }

    /// Users whose documents are waiting on an administrator decision
    pub async fn pending_verifications(&self) -> UserResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE documents_uploaded = true AND admin_verified = false AND status = 'active' ORDER BY updated_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Count of users awaiting verification review
    pub async fn count_pending_verifications(&self) -> UserResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE documents_uploaded = true AND admin_verified = false AND status = 'active'"
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }

    /// Flag or unflag a user as a verified tutor
    pub async fn set_verified_tutor(&self, user_id: i64, verified: bool) -> UserResult<()> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET verified_tutor = ?, updated_at = ? WHERE id = ? AND status != 'deleted'",
        )
        .bind(verified)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        Ok(())
    }

    /// Soft-delete an account and neutralise everything it owns: sessions
    /// are revoked and unsold listings are pulled from the marketplace.
    /// Sold listings keep their history.
    pub async fn delete_account(&self, user_id: i64) -> UserResult<()> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE users SET status = 'deleted', updated_at = ? WHERE id = ? AND status != 'deleted'",
        )
        .bind(&now)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "UPDATE products SET status = 'rejected', rejection_reason = 'seller account deleted', updated_at = ? WHERE seller_id = ? AND status IN ('pending', 'active')"
        )
        .bind(&now)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
