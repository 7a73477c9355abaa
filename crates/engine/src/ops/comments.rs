//! Comments on recipes.

use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use super::{Engine, normalize_required_name, with_tx};
use crate::{ResultEngine, comments};

impl Engine {
    /// Attach a comment to a recipe and return the new comment id.
    pub async fn add_comment(
        &self,
        recipe_id: i32,
        username: &str,
        body: &str,
    ) -> ResultEngine<i32> {
        let body = normalize_required_name(body, "comment")?;
        with_tx!(self, |db_tx| {
            self.require_recipe_exists(&db_tx, recipe_id).await?;
            let comment = comments::ActiveModel {
                user_id: ActiveValue::Set(username.to_string()),
                recipe_id: ActiveValue::Set(recipe_id),
                body: ActiveValue::Set(body.clone()),
                ..Default::default()
            };
            let comment = comment.insert(&db_tx).await?;
            Ok(comment.id)
        })
    }
}
