use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::info;

use crate::config::AuthConfig;
use crate::database::Database;
use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl User {
    pub async fn find_by_username(
        db: &Database,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&db.pool)
            .await?;
        Ok(user)
    }

    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }

    /// Creates the default admin account on first run. Idempotent: if a user
    /// with the configured username already exists, nothing happens.
    pub async fn ensure_bootstrap_admin(db: &Database, auth: &AuthConfig) -> Result<(), AppError> {
        if Self::find_by_username(db, &auth.admin_username).await?.is_some() {
            return Ok(());
        }

        let hash = bcrypt::hash(&auth.admin_password, bcrypt::DEFAULT_COST)?;

        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(&auth.admin_username)
            .bind(&hash)
            .execute(&db.pool)
            .await?;

        info!("Bootstrap admin account '{}' created", auth.admin_username);
        Ok(())
    }
}
