use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Connects the pool handle that `PgUserStore` borrows. Pooling policy
/// beyond the size knob stays with the deployment.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    tracing::debug!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

/// Applies the embedded schema migrations (the `users` table and its unique
/// email index).
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("run migrations")?;
    tracing::info!("migrations applied");
    Ok(())
}
