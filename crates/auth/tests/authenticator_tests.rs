use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};
use std::str::FromStr;
use tempfile::TempDir;
use zenith_auth::{AuthError, Authenticator};
use zenith_config::AuthConfig;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

fn default_auth_config() -> AuthConfig {
    AuthConfig {
        session_ttl_seconds: 3_600,
    }
}

struct TestContext {
    pool: SqlitePool,
    authenticator: Authenticator,
    _temp_dir: TempDir,
    config: AuthConfig,
}

impl TestContext {
    async fn new(config: AuthConfig) -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("auth.sqlite");
        let db_url = format!("sqlite://{}", db_path.display());

        let mut options = SqliteConnectOptions::from_str(&db_url)?;
        options = options.create_if_missing(true);
        options = options.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;

        let authenticator = Authenticator::new(pool.clone(), config.clone());

        Ok(Self {
            pool,
            authenticator,
            _temp_dir: temp_dir,
            config,
        })
    }

    async fn new_default() -> TestResult<Self> {
        Self::new(default_auth_config()).await
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}

#[tokio::test]
async fn register_with_password_persists_user_and_password_identity() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let user = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", Some("Alice"))
        .await?;

    assert_eq!(user.email.as_deref(), Some("alice@campus.edu"));
    assert_eq!(user.display_name.as_deref(), Some("Alice"));
    assert_eq!(user.role, "user");
    assert!(!user.is_admin());

    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(user.id)
        .fetch_one(ctx.pool())
        .await?;
    assert_eq!(user_count, 1, "user row should exist");

    let identity =
        sqlx::query("SELECT provider, provider_uid, secret FROM user_identities WHERE user_id = ?")
            .bind(user.id)
            .fetch_one(ctx.pool())
            .await?;

    let provider: String = identity.get("provider");
    let provider_uid: String = identity.get("provider_uid");
    let secret: String = identity.get("secret");

    assert_eq!(provider, "password");
    assert_eq!(provider_uid, "alice@campus.edu");
    assert!(
        secret.starts_with("$argon2"),
        "secret must be an argon2 hash"
    );

    Ok(())
}

#[tokio::test]
async fn register_with_password_rejects_duplicate_email() -> TestResult {
    let ctx = TestContext::new_default().await?;
    ctx.authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    let err = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "another-pass", None)
        .await
        .expect_err("expected duplicate email to fail");

    assert!(matches!(err, AuthError::UserExists));

    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(ctx.pool())
        .await?;
    assert_eq!(user_count, 1, "no additional users should be created");

    Ok(())
}

#[tokio::test]
async fn register_with_password_hashes_secret_using_argon2() -> TestResult {
    let ctx = TestContext::new_default().await?;

    let first = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;
    let first_secret: String =
        sqlx::query_scalar("SELECT secret FROM user_identities WHERE user_id = ?")
            .bind(first.id)
            .fetch_one(ctx.pool())
            .await?;

    let second = ctx
        .authenticator()
        .register_with_password("bob@campus.edu", "s3cret-pass", None)
        .await?;
    let second_secret: String =
        sqlx::query_scalar("SELECT secret FROM user_identities WHERE user_id = ?")
            .bind(second.id)
            .fetch_one(ctx.pool())
            .await?;

    assert_ne!(
        first_secret, second_secret,
        "argon2 salts should differ per registration"
    );

    argon2::password_hash::PasswordHash::new(&first_secret)?;
    argon2::password_hash::PasswordHash::new(&second_secret)?;

    Ok(())
}

#[tokio::test]
async fn login_with_password_returns_session_for_valid_credentials() -> TestResult {
    let ctx = TestContext::new_default().await?;
    ctx.authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    let session = ctx
        .authenticator()
        .login_with_password("alice@campus.edu", "s3cret-pass")
        .await?;

    let ttl = Duration::seconds(ctx.config.session_ttl_seconds as i64);
    let remaining = session.expires_at - Utc::now();
    assert!(
        (remaining - ttl).num_seconds().abs() <= 2,
        "session ttl should respect configuration"
    );

    let stored_expires: String =
        sqlx::query_scalar("SELECT expires_at FROM sessions WHERE token = ?")
            .bind(&session.token)
            .fetch_one(ctx.pool())
            .await?;
    let parsed = DateTime::parse_from_rfc3339(&stored_expires)?.with_timezone(&Utc);
    assert_eq!(parsed, session.expires_at);

    Ok(())
}

#[tokio::test]
async fn login_with_password_records_last_login_timestamp() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let user = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    let before: Option<String> = sqlx::query_scalar("SELECT last_login_at FROM users WHERE id = ?")
        .bind(user.id)
        .fetch_one(ctx.pool())
        .await?;
    assert!(before.is_none(), "no login recorded yet");

    ctx.authenticator()
        .login_with_password("alice@campus.edu", "s3cret-pass")
        .await?;

    let after: Option<String> = sqlx::query_scalar("SELECT last_login_at FROM users WHERE id = ?")
        .bind(user.id)
        .fetch_one(ctx.pool())
        .await?;
    let stamp = after.ok_or("last_login_at should be set")?;
    DateTime::parse_from_rfc3339(&stamp)?;

    Ok(())
}

#[tokio::test]
async fn login_with_password_rejects_incorrect_secret() -> TestResult {
    let ctx = TestContext::new_default().await?;
    ctx.authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    let err = ctx
        .authenticator()
        .login_with_password("alice@campus.edu", "bad-secret")
        .await
        .expect_err("expected invalid password");
    assert!(matches!(err, AuthError::InvalidCredentials));

    let session_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(ctx.pool())
        .await?;
    assert_eq!(session_count, 0, "no sessions should be issued on failure");

    Ok(())
}

#[tokio::test]
async fn login_with_password_rejects_unknown_email() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let err = ctx
        .authenticator()
        .login_with_password("unknown@campus.edu", "whatever-pass")
        .await
        .expect_err("expected unknown email to fail");
    assert!(matches!(err, AuthError::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn login_with_password_refuses_suspended_account() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let user = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    sqlx::query("UPDATE users SET status = 'suspended' WHERE id = ?")
        .bind(user.id)
        .execute(ctx.pool())
        .await?;

    let err = ctx
        .authenticator()
        .login_with_password("alice@campus.edu", "s3cret-pass")
        .await
        .expect_err("suspended accounts must not log in");
    assert!(matches!(err, AuthError::AccountDisabled));

    let session_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(ctx.pool())
        .await?;
    assert_eq!(session_count, 0);

    Ok(())
}

#[tokio::test]
async fn authenticate_token_returns_user_and_session_for_active_token() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let user = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", Some("Alice"))
        .await?;
    let session = ctx
        .authenticator()
        .login_with_password("alice@campus.edu", "s3cret-pass")
        .await?;

    let (resolved_user, resolved_session) = ctx
        .authenticator()
        .authenticate_token(&session.token)
        .await?;

    assert_eq!(resolved_user.id, user.id);
    assert_eq!(resolved_user.display_name.as_deref(), Some("Alice"));
    assert_eq!(resolved_session.token, session.token);
    Ok(())
}

#[tokio::test]
async fn authenticate_token_deletes_expired_sessions() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let user = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    let token = "expired-token";
    let created_at = (Utc::now() - Duration::hours(2)).to_rfc3339();
    let expires_at = (Utc::now() - Duration::hours(1)).to_rfc3339();

    sqlx::query(
        "INSERT INTO sessions (user_id, token, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user.id)
    .bind(token)
    .bind(&created_at)
    .bind(&expires_at)
    .execute(ctx.pool())
    .await?;

    let err = ctx
        .authenticator()
        .authenticate_token(token)
        .await
        .expect_err("expired token should be rejected");
    assert!(matches!(err, AuthError::SessionExpired));

    let remaining: Option<i64> = sqlx::query_scalar("SELECT 1 FROM sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(ctx.pool())
        .await?;
    assert!(
        remaining.is_none(),
        "expired session should be removed from the database"
    );

    Ok(())
}

#[tokio::test]
async fn authenticate_token_rejects_unknown_token() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let err = ctx
        .authenticator()
        .authenticate_token("missing-token")
        .await
        .expect_err("unknown token should not authenticate");
    assert!(matches!(err, AuthError::SessionNotFound));
    Ok(())
}

#[tokio::test]
async fn authenticate_token_refuses_account_suspended_after_login() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let user = ctx
        .authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;
    let session = ctx
        .authenticator()
        .login_with_password("alice@campus.edu", "s3cret-pass")
        .await?;

    sqlx::query("UPDATE users SET status = 'suspended' WHERE id = ?")
        .bind(user.id)
        .execute(ctx.pool())
        .await?;

    let err = ctx
        .authenticator()
        .authenticate_token(&session.token)
        .await
        .expect_err("suspension must invalidate existing sessions");
    assert!(matches!(err, AuthError::AccountDisabled));

    Ok(())
}

#[tokio::test]
async fn revoke_session_invalidates_token() -> TestResult {
    let ctx = TestContext::new_default().await?;
    ctx.authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;
    let session = ctx
        .authenticator()
        .login_with_password("alice@campus.edu", "s3cret-pass")
        .await?;

    ctx.authenticator().revoke_session(&session.token).await?;

    let err = ctx
        .authenticator()
        .authenticate_token(&session.token)
        .await
        .expect_err("revoked token should not authenticate");
    assert!(matches!(err, AuthError::SessionNotFound));

    // revoking twice is harmless
    ctx.authenticator().revoke_session(&session.token).await?;

    Ok(())
}

#[tokio::test]
async fn admin_role_is_reflected_on_authenticated_user() -> TestResult {
    let ctx = TestContext::new_default().await?;
    let user = ctx
        .authenticator()
        .register_with_password("staff@campus.edu", "s3cret-pass", None)
        .await?;

    sqlx::query("UPDATE users SET role = 'admin' WHERE id = ?")
        .bind(user.id)
        .execute(ctx.pool())
        .await?;

    let session = ctx
        .authenticator()
        .login_with_password("staff@campus.edu", "s3cret-pass")
        .await?;
    let (resolved, _) = ctx
        .authenticator()
        .authenticate_token(&session.token)
        .await?;

    assert!(resolved.is_admin());
    Ok(())
}

#[tokio::test]
async fn generate_session_token_produces_unique_urlsafe_tokens() -> TestResult {
    let ctx = TestContext::new_default().await?;
    ctx.authenticator()
        .register_with_password("alice@campus.edu", "s3cret-pass", None)
        .await?;

    let mut tokens = HashSet::new();
    for _ in 0..5 {
        let session = ctx
            .authenticator()
            .login_with_password("alice@campus.edu", "s3cret-pass")
            .await?;
        assert!(
            URL_SAFE_NO_PAD.decode(session.token.as_bytes()).is_ok(),
            "token should be URL safe base64"
        );
        assert!(
            tokens.insert(session.token.clone()),
            "tokens should be unique per session"
        );
    }
    Ok(())
}
