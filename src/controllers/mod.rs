pub mod auth;
pub mod movies;
pub mod tickets;

use axum::{response::Html, routing::get, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::views::{self, Flash};

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(movies::routes())
        .merge(tickets::routes())
}

async fn index() -> Html<String> {
    views::index()
}

async fn health() -> &'static str {
    "OK"
}

/// One-shot status messages travel in the redirect's query string: `msg` for
/// success, `error` for failures.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub msg: Option<String>,
    pub error: Option<String>,
}

impl FlashParams {
    pub fn as_flash(&self) -> Option<Flash<'_>> {
        if let Some(e) = &self.error {
            return Some(Flash::Error(e));
        }
        self.msg.as_deref().map(Flash::Success)
    }
}

/// Appends a urlencoded `key=message` pair to a redirect target.
pub fn with_message(path: &str, key: &str, message: &str) -> String {
    match serde_urlencoded::to_string([(key, message)]) {
        Ok(query) => format!("{}?{}", path, query),
        Err(_) => path.to_string(),
    }
}
