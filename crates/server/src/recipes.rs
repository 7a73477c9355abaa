//! Recipe browsing and submission endpoints.

use api_types::recipe::{
    CategoryView, CommentView, NewRecipeForm, RecipeDetailResponse, RecipeIngredientView,
    RecipeListResponse, RecipeSummary,
};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{ServerError, server::ServerState};
use engine::{Category, CategoryRef, EngineError, NewRecipeCmd, User};

/// Quantity units offered by the submission form. Presentation only, the
/// engine stores whatever quantity string was built from the form.
pub(crate) const UNITS: [&str; 10] = [
    "g", "kg", "mL", "L", "cups", "tbsp", "tsp", "oz", "lb", "unit(s)",
];

fn map_category(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
    }
}

/// The recipe index, open to everyone.
pub async fn index(
    State(state): State<ServerState>,
) -> Result<Json<RecipeListResponse>, ServerError> {
    let recipes = state.engine.list_recipes().await?;
    let recipes = recipes
        .into_iter()
        .map(|(recipe, categories)| RecipeSummary {
            id: recipe.id,
            author: recipe.user_id,
            title: recipe.title,
            categories: categories.into_iter().map(map_category).collect(),
            has_image: recipe.image.is_some(),
        })
        .collect();

    Ok(Json(RecipeListResponse { recipes }))
}

/// One recipe with its ingredient lines and comments, open to everyone.
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeDetailResponse>, ServerError> {
    let detail = state.engine.recipe_detail(id).await?;

    Ok(Json(RecipeDetailResponse {
        id: detail.recipe.id,
        author: detail.recipe.user_id,
        title: detail.recipe.title,
        preparation: detail.recipe.preparation,
        notes: detail.recipe.notes,
        categories: detail.categories.into_iter().map(map_category).collect(),
        ingredients: detail
            .ingredients
            .into_iter()
            .map(|entry| RecipeIngredientView {
                name: entry.name,
                quantity: entry.quantity,
            })
            .collect(),
        comments: detail
            .comments
            .into_iter()
            .map(|comment| CommentView {
                author: comment.user_id,
                body: comment.body,
            })
            .collect(),
        has_image: detail.recipe.image.is_some(),
    }))
}

async fn form_state(
    state: &ServerState,
    error: Option<String>,
) -> Result<NewRecipeForm, ServerError> {
    let categories = state.engine.list_categories().await?;
    Ok(NewRecipeForm {
        categories: categories.into_iter().map(map_category).collect(),
        units: UNITS.iter().map(|unit| (*unit).to_string()).collect(),
        error,
    })
}

/// The blank submission form: selectable categories and units.
pub async fn new_form(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<NewRecipeForm>, ServerError> {
    Ok(Json(form_state(&state, None).await?))
}

/// The raw multipart fields of one submission, before any validation.
#[derive(Default)]
struct SubmittedRecipe {
    title: String,
    preparation: String,
    notes: Option<String>,
    categories: Vec<String>,
    ingredient_names: Vec<String>,
    ingredient_quantities: Vec<String>,
    ingredient_units: Vec<String>,
    photo: Option<Vec<u8>>,
}

async fn read_form(multipart: &mut Multipart) -> Result<SubmittedRecipe, ServerError> {
    let mut form = SubmittedRecipe::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServerError::Generic(err.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        if name == "photo" {
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ServerError::Generic(err.to_string()))?;
            // Browsers send an empty part when no file was chosen.
            if !bytes.is_empty() {
                form.photo = Some(bytes.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| ServerError::Generic(err.to_string()))?;
        match name.as_str() {
            "title" => form.title = value,
            "preparation" => form.preparation = value,
            "notes" => form.notes = Some(value),
            "categories" => form.categories.push(value),
            "ingredient_name" => form.ingredient_names.push(value),
            "ingredient_qty" => form.ingredient_quantities.push(value),
            "ingredient_unit" => form.ingredient_units.push(value),
            _ => {}
        }
    }

    Ok(form)
}

/// Handle a submission of the new-recipe form.
///
/// Validation failures re-serve the form state with the message attached;
/// success redirects to the index.
pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let form = read_form(&mut multipart).await?;

    let categories = form
        .categories
        .iter()
        .filter_map(|value| CategoryRef::parse(value))
        .collect();

    let mut cmd = NewRecipeCmd::new(&user.username, form.title, form.preparation)
        .categories(categories)
        .ingredients(
            form.ingredient_names,
            form.ingredient_quantities,
            form.ingredient_units,
        );
    if let Some(notes) = form.notes {
        cmd = cmd.notes(notes);
    }
    if let Some(photo) = form.photo {
        cmd = cmd.image(photo);
    }

    match state.engine.create_recipe(cmd).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(
            err @ (EngineError::TitleRequired
            | EngineError::PreparationRequired
            | EngineError::ImageTooLarge),
        ) => {
            let form = form_state(&state, Some(err.to_string())).await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(form)).into_response())
        }
        Err(err) => Err(ServerError::Engine(err)),
    }
}
