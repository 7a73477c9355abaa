use axum::{
    Router,
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use std::sync::Arc;

use crate::{comments, recipes, user};
use engine::Engine;

/// Multipart bodies carry the photo plus every other form field, so the
/// request limit needs headroom above the 2 MB the engine accepts for the
/// photo itself. Oversized photos must reach the engine to get the
/// friendly error instead of a bare 413.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn auth(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(cookie) = jar.get(user::SESSION_COOKIE) else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    let Ok(token) = Uuid::parse_str(cookie.value()) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let session_user = state.engine.session_user(token).await.map_err(|err| {
        tracing::error!("session lookup failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let Some(session_user) = session_user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(session_user);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/recipes/new", get(recipes::new_form).post(recipes::create))
        .route("/recipes/{id}/comments", post(comments::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/", get(recipes::index))
        .route("/recipes/{id}", get(recipes::detail))
        .route("/login", get(user::login_form).post(user::login))
        .route("/logout", get(user::logout).post(user::logout))
        .route("/register", get(user::register_form).post(user::register))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
