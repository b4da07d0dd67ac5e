pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod sessions;
pub mod views;

use std::sync::Arc;

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub sessions: sessions::SessionStore,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;

        db.run_migrations().await?;

        models::User::ensure_bootstrap_admin(&db, &config.auth).await?;

        let sessions =
            sessions::SessionStore::connect(&config.redis.url, config.auth.session_ttl_hours)
                .await?;

        Ok(Arc::new(Self {
            db,
            sessions,
            config,
        }))
    }
}
