use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod comments;
mod recipes;
mod server;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{AuthForm, LoginRequest, RegisterRequest};
    }

    pub mod recipe {
        pub use api_types::recipe::{
            CategoryView, CommentView, NewRecipeForm, RecipeDetailResponse, RecipeIngredientView,
            RecipeListResponse, RecipeSummary,
        };
    }

    pub mod comment {
        pub use api_types::comment::{CommentCreated, CommentNew};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::UsernameTaken => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::Credential(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::TitleRequired
        | EngineError::PreparationRequired
        | EngineError::ImageTooLarge
        | EngineError::PasswordMismatch
        | EngineError::InvalidName(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Credential(detail) => {
            tracing::error!("credential backend error: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
