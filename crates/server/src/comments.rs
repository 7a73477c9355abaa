//! Comment API endpoints.

use api_types::comment::{CommentCreated, CommentNew};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::User;

/// Attach a comment to a recipe. Requires a logged-in user.
pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<CommentNew>,
) -> Result<(StatusCode, Json<CommentCreated>), ServerError> {
    let id = state
        .engine
        .add_comment(recipe_id, &user.username, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentCreated { id })))
}
