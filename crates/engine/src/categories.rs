//! Recipe categories.
//!
//! Categories are shared across the whole site: names are unique and a
//! category is never deleted when a recipe that uses it goes away.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe_categories::Entity")]
    RecipeCategories,
}

impl Related<super::recipe_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A category row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// One category entry from the submission form.
///
/// The form sends categories as opaque strings: the checkboxes carry the id
/// of an existing category, the free-text input carries a new name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryRef {
    /// Id of a category that should already exist.
    Existing(i32),
    /// Name of a category to look up or create.
    New(String),
}

impl CategoryRef {
    /// Parse one raw form value.
    ///
    /// Blank entries yield `None`. Strings made only of ASCII digits are
    /// treated as ids; digit strings too large for an id behave like a
    /// stale one and are dropped. Everything else is a trimmed name.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return trimmed.parse().ok().map(Self::Existing);
        }
        Some(Self::New(trimmed.to_string()))
    }
}
