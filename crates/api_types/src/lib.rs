//! Request and response bodies shared between the server and its clients.

use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub username: String,
        pub email: String,
        pub password: String,
        /// The password typed a second time.
        pub confirmation: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub username: String,
        pub password: String,
    }

    /// State of the login/register form, rendered by the client.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthForm {
        pub message: Option<String>,
    }
}

pub mod recipe {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub name: String,
    }

    /// One entry of the recipe index.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeSummary {
        pub id: i32,
        pub author: String,
        pub title: String,
        pub categories: Vec<CategoryView>,
        pub has_image: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeListResponse {
        pub recipes: Vec<RecipeSummary>,
    }

    /// One ingredient line: shared name plus the quantity recorded for
    /// this recipe ("2 cups", "3", or empty).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeIngredientView {
        pub name: String,
        pub quantity: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentView {
        pub author: String,
        pub body: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeDetailResponse {
        pub id: i32,
        pub author: String,
        pub title: String,
        pub preparation: String,
        pub notes: Option<String>,
        pub categories: Vec<CategoryView>,
        pub ingredients: Vec<RecipeIngredientView>,
        pub comments: Vec<CommentView>,
        pub has_image: bool,
    }

    /// State of the new-recipe form: what to offer, plus the validation
    /// message when a submission was rejected.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct NewRecipeForm {
        pub categories: Vec<CategoryView>,
        pub units: Vec<String>,
        pub error: Option<String>,
    }
}

pub mod comment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentNew {
        pub body: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentCreated {
        pub id: i32,
    }
}
