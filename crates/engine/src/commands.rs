//! Command structs carrying the parameters of engine write operations.

use crate::CategoryRef;

/// Parameters for [`crate::Engine::register_user`].
#[derive(Clone, Debug)]
pub struct RegisterCmd {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Second copy of the password typed into the form.
    pub confirmation: String,
}

/// Parameters for [`crate::Engine::create_recipe`].
///
/// The three ingredient lists are positional: entry `i` of each list
/// describes the same form row. They may have different lengths, the
/// engine treats missing entries as empty.
#[derive(Clone, Debug, Default)]
pub struct NewRecipeCmd {
    pub user_id: String,
    pub title: String,
    pub preparation: String,
    pub notes: Option<String>,
    pub categories: Vec<CategoryRef>,
    pub ingredient_names: Vec<String>,
    pub ingredient_quantities: Vec<String>,
    pub ingredient_units: Vec<String>,
    pub image: Option<Vec<u8>>,
}

impl NewRecipeCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        preparation: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            preparation: preparation.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn categories(mut self, categories: Vec<CategoryRef>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn ingredients(
        mut self,
        names: Vec<String>,
        quantities: Vec<String>,
        units: Vec<String>,
    ) -> Self {
        self.ingredient_names = names;
        self.ingredient_quantities = quantities;
        self.ingredient_units = units;
        self
    }

    #[must_use]
    pub fn image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Some(bytes);
        self
    }
}
