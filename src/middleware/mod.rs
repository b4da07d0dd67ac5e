use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::Redirect,
};
use std::sync::Arc;

pub use crate::sessions::SessionUser;

// Session-cookie extractor: the login guard for protected handlers. A handler
// that takes `SessionUser` as an argument only runs with a live session;
// otherwise the request is redirected to the login form with a warning.
impl FromRequestParts<Arc<crate::AppState>> for SessionUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let login = || {
            Redirect::to(&crate::controllers::with_message(
                "/login",
                "error",
                "Debes iniciar sesión",
            ))
        };

        let cookies = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(login)?;

        let token = crate::sessions::cookie_value(cookies, &state.config.auth.session_cookie)
            .ok_or_else(login)?;

        // A Redis hiccup reads as "no session": the user lands on the login
        // form instead of a 500.
        state
            .sessions
            .get(token)
            .await
            .ok()
            .flatten()
            .ok_or_else(login)
    }
}
