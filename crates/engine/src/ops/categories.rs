//! Category lookups and the get-or-create step used by recipe creation.

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*, sea_query::OnConflict,
};

use super::Engine;
use crate::{Category, EngineError, ResultEngine, categories};

impl Engine {
    /// All categories, ordered by name.
    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// Return the id of the category called `name`, creating it if needed.
    ///
    /// The insert is an upsert on the unique name index, so two concurrent
    /// creations of the same name converge on one row instead of one of
    /// them failing.
    pub(super) async fn get_or_create_category(
        &self,
        db_tx: &DatabaseTransaction,
        name: &str,
    ) -> ResultEngine<i32> {
        let insert = categories::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        categories::Entity::insert(insert)
            .on_conflict(
                OnConflict::column(categories::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db_tx)
            .await?;

        let model = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        Ok(model.id)
    }
}
