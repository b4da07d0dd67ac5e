//! Server-side session store. Each login mints an opaque UUID token; the
//! session record lives in Redis under `session:{token}` with a TTL, and the
//! browser only ever sees the token.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub username: String,
}

#[derive(Clone)]
pub struct SessionStore {
    conn: MultiplexedConnection,
    ttl_seconds: u64,
}

impl SessionStore {
    pub async fn connect(redis_url: &str, ttl_hours: u64) -> redis::RedisResult<Self> {
        let client = Client::open(redis_url)?;
        let conn = client.get_multiplexed_tokio_connection().await?;
        Ok(SessionStore {
            conn,
            ttl_seconds: ttl_hours * 3600,
        })
    }

    fn key(token: &str) -> String {
        format!("session:{}", token)
    }

    pub async fn create(&self, user: &SessionUser) -> Result<String, redis::RedisError> {
        let token = Uuid::new_v4().to_string();
        let data = serde_json::to_string(user).map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "Serialize error"))
        })?;
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(Self::key(&token), data, self.ttl_seconds).await?;
        info!("Session established for user {}", user.username);
        Ok(token)
    }

    pub async fn get(&self, token: &str) -> Result<Option<SessionUser>, redis::RedisError> {
        let mut conn = self.conn.clone();
        let data: Option<String> = conn.get(Self::key(token)).await?;
        Ok(data.and_then(|d| serde_json::from_str(&d).ok()))
    }

    /// Idempotent: destroying a token that no longer exists is fine.
    pub async fn destroy(&self, token: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::key(token)).await?;
        Ok(())
    }
}

/* ---------- cookie transport helpers ---------- */

/// Pulls the named cookie's value out of a raw `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

/// `Set-Cookie` value establishing the session.
pub fn session_cookie(name: &str, token: &str, ttl_hours: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name,
        token,
        ttl_hours * 3600
    )
}

/// `Set-Cookie` value clearing the session on logout.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_the_named_cookie() {
        let header = "theme=dark; cine_session=abc-123; lang=es";
        assert_eq!(cookie_value(header, "cine_session"), Some("abc-123"));
    }

    #[test]
    fn cookie_value_ignores_prefix_matches() {
        let header = "cine_session_old=zzz; cine_session=abc";
        assert_eq!(cookie_value(header, "cine_session"), Some("abc"));
    }

    #[test]
    fn cookie_value_handles_missing_cookie() {
        assert_eq!(cookie_value("theme=dark", "cine_session"), None);
        assert_eq!(cookie_value("", "cine_session"), None);
        assert_eq!(cookie_value("garbage", "cine_session"), None);
    }

    #[test]
    fn session_cookie_is_http_only_and_scoped_to_root() {
        let cookie = session_cookie("cine_session", "tok", 24);
        assert!(cookie.starts_with("cine_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        assert!(clear_session_cookie("cine_session").contains("Max-Age=0"));
    }
}
