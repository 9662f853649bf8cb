//! Tutor application repository for database operations.

use crate::entities::tutor_application::ApplicationStatus;
use crate::entities::{CreateTutorApplicationRequest, TutorApplication, TutorProfile};
use crate::types::{TutorApplicationError, TutorResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const APPLICATION_COLUMNS: &str = "id, public_id, user_id, subjects, qualifications, hourly_rate_cents, status, rejection_reason, verification_notes, reviewed_at, created_at, updated_at";

/// Repository for tutor application database operations
#[derive(Clone)]
pub struct TutorApplicationRepository {
    pool: SqlitePool,
}

impl TutorApplicationRepository {
    /// Create a new tutor application repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> TutorApplication {
        TutorApplication {
            id: row.get("id"),
            public_id: row.get("public_id"),
            user_id: row.get("user_id"),
            subjects: row.get("subjects"),
            qualifications: row.get("qualifications"),
            hourly_rate_cents: row.get("hourly_rate_cents"),
            status: ApplicationStatus::from(row.get::<String, _>("status").as_str()),
            rejection_reason: row.get("rejection_reason"),
            verification_notes: row.get("verification_notes"),
            reviewed_at: row.get("reviewed_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// Submit a new application. A user may hold at most one live
    /// application: a pending one awaiting review or an approved one.
    /// Rejected applications do not block re-applying.
    pub async fn create(
        &self,
        user_id: i64,
        request: &CreateTutorApplicationRequest,
    ) -> TutorResult<TutorApplication> {
        let live_count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tutor_applications WHERE user_id = ? AND status IN ('pending', 'approved')"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        if live_count.unwrap_or(0) > 0 {
            return Err(TutorApplicationError::ApplicationAlreadyOpen);
        }

        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::create_id();

        let result = sqlx::query(
            "INSERT INTO tutor_applications (public_id, user_id, subjects, qualifications, hourly_rate_cents, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 'pending', ?, ?)"
        )
        .bind(&public_id)
        .bind(user_id)
        .bind(&request.subjects)
        .bind(&request.qualifications)
        .bind(request.hourly_rate_cents)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        let application_id = result.last_insert_rowid();
        self.find_by_id(application_id).await?.ok_or_else(|| {
            TutorApplicationError::DatabaseError("failed to retrieve created application".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> TutorResult<Option<TutorApplication>> {
        let row = sqlx::query(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM tutor_applications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Find application by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> TutorResult<Option<TutorApplication>> {
        let row = sqlx::query(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM tutor_applications WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// The applicant's most recent application, if any
    pub async fn find_latest_for_user(&self, user_id: i64) -> TutorResult<Option<TutorApplication>> {
        let row = sqlx::query(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM tutor_applications WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Admin listing filtered by lifecycle status
    pub async fn list_by_status(
        &self,
        status: ApplicationStatus,
        limit: i64,
        offset: i64,
    ) -> TutorResult<Vec<TutorApplication>> {
        let rows = sqlx::query(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM tutor_applications WHERE status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(status.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Count of applications awaiting review
    pub async fn count_pending(&self) -> TutorResult<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM tutor_applications WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }

    /// Approve a pending application and flag the applicant as a verified
    /// tutor in the same transaction.
    pub async fn approve(
        &self,
        public_id: &str,
        notes: Option<&str>,
    ) -> TutorResult<TutorApplication> {
        let application = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(TutorApplicationError::ApplicationNotFound)?;

        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE tutor_applications SET status = 'approved', verification_notes = ?, rejection_reason = NULL, reviewed_at = ?, updated_at = ? WHERE id = ? AND status = 'pending'"
        )
        .bind(notes)
        .bind(&now)
        .bind(&now)
        .bind(application.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TutorApplicationError::NotPending);
        }

        sqlx::query("UPDATE users SET verified_tutor = true, updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(application.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        self.find_by_id(application.id)
            .await?
            .ok_or(TutorApplicationError::ApplicationNotFound)
    }

    /// Reject a pending application. The reason is mandatory; notes are an
    /// optional internal annotation.
    pub async fn reject(
        &self,
        public_id: &str,
        reason: &str,
        notes: Option<&str>,
    ) -> TutorResult<TutorApplication> {
        if reason.trim().is_empty() {
            return Err(TutorApplicationError::ReasonRequired);
        }

        let application = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(TutorApplicationError::ApplicationNotFound)?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE tutor_applications SET status = 'rejected', rejection_reason = ?, verification_notes = ?, reviewed_at = ?, updated_at = ? WHERE id = ? AND status = 'pending'"
        )
        .bind(reason)
        .bind(notes)
        .bind(&now)
        .bind(&now)
        .bind(application.id)
        .execute(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TutorApplicationError::NotPending);
        }

        self.find_by_id(application.id)
            .await?
            .ok_or(TutorApplicationError::ApplicationNotFound)
    }

    /// Public directory of approved tutors joined with their profile data
    pub async fn list_approved_tutors(&self, limit: i64, offset: i64) -> TutorResult<Vec<TutorProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT u.public_id AS user_public_id, u.display_name, u.campus, u.avatar_url,
                   a.subjects, a.qualifications, a.hourly_rate_cents
            FROM tutor_applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.status = 'approved' AND u.status = 'active'
            ORDER BY a.reviewed_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TutorApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| TutorProfile {
                user_public_id: row.get("user_public_id"),
                display_name: row.get("display_name"),
                campus: row.get("campus"),
                avatar_url: row.get("avatar_url"),
                subjects: row.get("subjects"),
                qualifications: row.get("qualifications"),
                hourly_rate_cents: row.get("hourly_rate_cents"),
            })
            .collect())
    }
}
