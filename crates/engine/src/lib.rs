//! The core logic of Ricettario.
//!
//! The [`Engine`] owns the database connection and exposes every operation
//! the HTTP server and the admin tool need: account registration and login,
//! session handling, recipe creation and browsing, and comments. Callers
//! never see the underlying tables, only the domain structs re-exported
//! here.

mod categories;
mod commands;
mod comments;
mod error;
mod ingredients;
mod ops;
mod recipe_categories;
mod recipe_ingredients;
mod recipes;
mod sessions;
mod users;

pub use categories::{Category, CategoryRef};
pub use commands::{NewRecipeCmd, RegisterCmd};
pub use comments::Comment;
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, MAX_IMAGE_BYTES};
pub use recipes::{IngredientEntry, Recipe, RecipeDetail};
pub use users::User;

type ResultEngine<T> = Result<T, EngineError>;
