//! The ingredient get-or-create step used by recipe creation.

use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, prelude::*, sea_query::OnConflict};

use super::Engine;
use crate::{EngineError, ResultEngine, ingredients};

impl Engine {
    /// Return the id of the ingredient called `name`, creating it if needed.
    ///
    /// Same upsert shape as the category variant: the unique name index
    /// absorbs races between concurrent recipe submissions.
    pub(super) async fn get_or_create_ingredient(
        &self,
        db_tx: &DatabaseTransaction,
        name: &str,
    ) -> ResultEngine<i32> {
        let insert = ingredients::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        ingredients::Entity::insert(insert)
            .on_conflict(
                OnConflict::column(ingredients::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db_tx)
            .await?;

        let model = ingredients::Entity::find()
            .filter(ingredients::Column::Name.eq(name))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("ingredient not exists".to_string()))?;
        Ok(model.id)
    }
}
