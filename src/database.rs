use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// Shared Postgres handle. Every model operation borrows this; the pool does
/// the per-request connection juggling.
#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;

        Ok(Database { pool })
    }

    /// Applies the schema migrations embedded from src/migrations at build
    /// time. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Applying schema migrations...");
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        info!("Schema up to date");
        Ok(())
    }
}
