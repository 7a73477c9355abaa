//! Recipe rows and the read-side structs built from them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Category, Comment};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub preparation: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_type = "Blob", nullable)]
    pub image: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::recipe_categories::Entity")]
    RecipeCategories,
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::recipe_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

// Categories are reached through the join table.
impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_categories::Relation::Recipe.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A recipe with its owner and content fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i32,
    pub user_id: String,
    pub title: String,
    pub preparation: String,
    pub notes: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl From<Model> for Recipe {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            preparation: model.preparation,
            notes: model.notes,
            image: model.image,
        }
    }
}

/// One ingredient line of a recipe: the shared ingredient name plus the
/// quantity string recorded for this recipe ("2 cups", "3", or empty).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub name: String,
    pub quantity: String,
}

/// Everything the detail page needs, read in one consistent snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub categories: Vec<Category>,
    pub ingredients: Vec<IngredientEntry>,
    pub comments: Vec<Comment>,
}
