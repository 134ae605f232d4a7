/// Cookie-backed session handling
///
/// A login mints a uuid token, stores it in the in-memory session map, and
/// sets it in a signed cookie. The `CurrentUser` extractor resolves the token
/// back to a user id; it never rejects, so unauthenticated requests reach the
/// handler with an empty identity instead of a 401.
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::SignedCookieJar;
use uuid::Uuid;

use super::state::AppState;

pub const SESSION_COOKIE: &str = "session_token";

/// Optional authenticated identity, passed explicitly into handlers
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Option<i64>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = match SignedCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(CurrentUser(None));
        };

        let sessions = state.sessions.read().await;
        Ok(CurrentUser(sessions.get(cookie.value()).copied()))
    }
}

/// Mints a session token for the user and sets the session cookie
pub async fn start_session(state: &AppState, jar: SignedCookieJar, user_id: i64) -> SignedCookieJar {
    let token = Uuid::new_v4().to_string();
    state.sessions.write().await.insert(token.clone(), user_id);

    jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true),
    )
}

/// Invalidates the session token and clears the cookie
pub async fn end_session(state: &AppState, jar: SignedCookieJar) -> SignedCookieJar {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.write().await.remove(cookie.value());
    }

    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
