//! Recipe creation, browsing and deletion.

use std::collections::HashSet;

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use super::{Engine, normalize_optional_text, with_tx};
use crate::{
    Category, CategoryRef, Comment, EngineError, IngredientEntry, NewRecipeCmd, Recipe,
    RecipeDetail, ResultEngine, categories, comments, ingredients, recipe_categories,
    recipe_ingredients, recipes,
};

/// Largest accepted photo, in bytes (2 MB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Build the quantity string for form row `index`.
///
/// The unit only matters when a quantity was typed: a unit with no
/// quantity yields the empty string, and rows past the end of either list
/// count as empty.
fn quantity_at(quantities: &[String], units: &[String], index: usize) -> String {
    let quantity = quantities
        .get(index)
        .map_or("", |value| value.trim());
    if quantity.is_empty() {
        return String::new();
    }
    match units.get(index).map(|value| value.trim()) {
        Some(unit) if !unit.is_empty() => format!("{quantity} {unit}"),
        _ => quantity.to_string(),
    }
}

impl Engine {
    /// Create a recipe with its category and ingredient links.
    ///
    /// Validation happens up front, first failure wins: title, then
    /// preparation, then photo size. After that everything runs in one
    /// transaction, so a failure halfway leaves no trace.
    ///
    /// Category references pointing at ids that no longer exist are
    /// skipped; the same category listed twice is linked once. Ingredient
    /// rows with a blank name are skipped, while duplicated names produce
    /// one link row each, all sharing a single ingredient record.
    pub async fn create_recipe(&self, cmd: NewRecipeCmd) -> ResultEngine<i32> {
        let title = cmd.title.trim();
        if title.is_empty() {
            return Err(EngineError::TitleRequired);
        }
        let preparation = cmd.preparation.trim();
        if preparation.is_empty() {
            return Err(EngineError::PreparationRequired);
        }
        if let Some(image) = &cmd.image
            && image.len() > MAX_IMAGE_BYTES
        {
            return Err(EngineError::ImageTooLarge);
        }
        let notes = normalize_optional_text(cmd.notes.as_deref());

        with_tx!(self, |db_tx| {
            let recipe = recipes::ActiveModel {
                user_id: ActiveValue::Set(cmd.user_id.clone()),
                title: ActiveValue::Set(title.to_string()),
                preparation: ActiveValue::Set(preparation.to_string()),
                notes: ActiveValue::Set(notes.clone()),
                image: ActiveValue::Set(cmd.image.clone()),
                ..Default::default()
            };
            let recipe = recipe.insert(&db_tx).await?;

            let mut linked = HashSet::new();
            for category in &cmd.categories {
                let category_id = match category {
                    CategoryRef::Existing(id) => categories::Entity::find_by_id(*id)
                        .one(&db_tx)
                        .await?
                        .map(|model| model.id),
                    CategoryRef::New(name) => {
                        Some(self.get_or_create_category(&db_tx, name).await?)
                    }
                };
                // Stale ids resolve to None and are dropped.
                let Some(category_id) = category_id else {
                    continue;
                };
                if !linked.insert(category_id) {
                    continue;
                }
                let link = recipe_categories::ActiveModel {
                    recipe_id: ActiveValue::Set(recipe.id),
                    category_id: ActiveValue::Set(category_id),
                };
                link.insert(&db_tx).await?;
            }

            for (index, raw_name) in cmd.ingredient_names.iter().enumerate() {
                let name = raw_name.trim();
                if name.is_empty() {
                    continue;
                }
                let ingredient_id = self.get_or_create_ingredient(&db_tx, name).await?;
                let quantity = quantity_at(
                    &cmd.ingredient_quantities,
                    &cmd.ingredient_units,
                    index,
                );
                let link = recipe_ingredients::ActiveModel {
                    recipe_id: ActiveValue::Set(recipe.id),
                    ingredient_id: ActiveValue::Set(ingredient_id),
                    quantity: ActiveValue::Set(quantity),
                    ..Default::default()
                };
                link.insert(&db_tx).await?;
            }

            Ok(recipe.id)
        })
    }

    /// All recipes with their categories, oldest first.
    pub async fn list_recipes(&self) -> ResultEngine<Vec<(Recipe, Vec<Category>)>> {
        let rows = recipes::Entity::find()
            .order_by_asc(recipes::Column::Id)
            .find_with_related(categories::Entity)
            .all(&self.database)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(model, related)| {
                (
                    Recipe::from(model),
                    related.into_iter().map(Category::from).collect(),
                )
            })
            .collect())
    }

    /// One recipe with categories, ingredient lines and comments.
    pub async fn recipe_detail(&self, recipe_id: i32) -> ResultEngine<RecipeDetail> {
        with_tx!(self, |db_tx| {
            let recipe = recipes::Entity::find_by_id(recipe_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("recipe not exists".to_string()))?;

            let category_models = recipe
                .find_related(categories::Entity)
                .order_by_asc(categories::Column::Name)
                .all(&db_tx)
                .await?;

            let ingredient_rows = recipe_ingredients::Entity::find()
                .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
                .order_by_asc(recipe_ingredients::Column::Id)
                .find_also_related(ingredients::Entity)
                .all(&db_tx)
                .await?;
            let mut ingredient_entries = Vec::with_capacity(ingredient_rows.len());
            for (link, ingredient) in ingredient_rows {
                let Some(ingredient) = ingredient else {
                    continue;
                };
                ingredient_entries.push(IngredientEntry {
                    name: ingredient.name,
                    quantity: link.quantity,
                });
            }

            let comment_models = comments::Entity::find()
                .filter(comments::Column::RecipeId.eq(recipe_id))
                .order_by_asc(comments::Column::Id)
                .all(&db_tx)
                .await?;

            Ok(RecipeDetail {
                recipe: Recipe::from(recipe),
                categories: category_models.into_iter().map(Category::from).collect(),
                ingredients: ingredient_entries,
                comments: comment_models.into_iter().map(Comment::from).collect(),
            })
        })
    }

    /// Delete a recipe; its links and comments go with it. Shared
    /// categories and ingredients stay.
    pub async fn delete_recipe(&self, recipe_id: i32) -> ResultEngine<()> {
        let result = recipes::Entity::delete_by_id(recipe_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("recipe not exists".to_string()));
        }
        Ok(())
    }

    pub(super) async fn require_recipe_exists(
        &self,
        db_tx: &DatabaseTransaction,
        recipe_id: i32,
    ) -> ResultEngine<()> {
        let found = recipes::Entity::find_by_id(recipe_id).one(db_tx).await?;
        if found.is_none() {
            return Err(EngineError::KeyNotFound("recipe not exists".to_string()));
        }
        Ok(())
    }
}
