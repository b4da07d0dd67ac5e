use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use std::sync::Arc;
use tracing::warn;

use crate::controllers::{with_message, FlashParams};
use crate::error::AppError;
use crate::forms::LoginForm;
use crate::models::User;
use crate::sessions::{self, SessionUser};
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

async fn login_form(Query(flash): Query<FlashParams>) -> Html<String> {
    views::login_page(flash.as_flash())
}

// One generic failure outcome: the caller never learns whether the username
// or the password was wrong.
async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let rejected =
        Redirect::to(&with_message("/login", "error", "Credenciales inválidas")).into_response();

    // exact-username lookup, no normalization
    let user = match User::find_by_username(&state.db, &form.username).await? {
        Some(user) if user.verify_password(&form.password) => user,
        _ => return Ok(rejected),
    };

    let session = SessionUser {
        user_id: user.id,
        username: user.username,
    };
    let token = match state.sessions.create(&session).await {
        Ok(token) => token,
        Err(e) => {
            warn!("session store unavailable: {:?}", e);
            return Ok(rejected);
        }
    };

    let cookie = sessions::session_cookie(
        &state.config.auth.session_cookie,
        &token,
        state.config.auth.session_ttl_hours,
    );
    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&with_message("/movies", "msg", "Sesión iniciada")),
    )
        .into_response())
}

// Idempotent: logging out without a session is still a clean redirect.
async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| sessions::cookie_value(cookies, &state.config.auth.session_cookie));

    if let Some(token) = token {
        if let Err(e) = state.sessions.destroy(token).await {
            warn!("failed to destroy session: {:?}", e);
        }
    }

    let cookie = sessions::clear_session_cookie(&state.config.auth.session_cookie);
    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&with_message("/", "msg", "Sesión cerrada")),
    )
        .into_response()
}
