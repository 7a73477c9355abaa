//! Registration, login and logout endpoints.
//!
//! Successful registration and login open a session and hand the token to
//! the browser as a cookie; the auth middleware in [`crate::server`] turns
//! that cookie back into a user on protected routes.

use api_types::user::{AuthForm, LoginRequest, RegisterRequest};
use axum::{Json, extract::State, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::RegisterCmd;

pub(crate) const SESSION_COOKIE: &str = "session";

fn session_cookie(token: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .build()
}

// Removal must match the path the cookie was set with.
fn expired_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

pub async fn register_form() -> Json<AuthForm> {
    Json(AuthForm { message: None })
}

/// Create an account and log the new user in.
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, Redirect), ServerError> {
    let user = state
        .engine
        .register_user(RegisterCmd {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            confirmation: payload.confirmation,
        })
        .await?;
    let token = state.engine.create_session(&user.username).await?;

    Ok((jar.add(session_cookie(token)), Redirect::to("/")))
}

pub async fn login_form() -> Json<AuthForm> {
    Json(AuthForm { message: None })
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Redirect), ServerError> {
    let user = state
        .engine
        .authenticate(&payload.username, &payload.password)
        .await?;
    let token = state.engine.create_session(&user.username).await?;

    Ok((jar.add(session_cookie(token)), Redirect::to("/")))
}

/// Close the current session, if any, and drop the cookie.
///
/// Works without a valid session so a stale cookie can always be cleared.
pub async fn logout(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ServerError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && let Ok(token) = Uuid::parse_str(cookie.value())
    {
        state.engine.destroy_session(token).await?;
    }

    Ok((jar.remove(expired_cookie()), Redirect::to("/")))
}
