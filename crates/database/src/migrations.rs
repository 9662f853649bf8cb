//! Database migrations

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

// The migration files live at the workspace root so the server binary and
// the integration tests resolve the same set.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("database migrations failed")?;
    info!("database migrations applied");
    Ok(())
}
