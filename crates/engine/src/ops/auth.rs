//! Account registration, login and session handling.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::{ActiveValue, SqlErr, prelude::*};
use uuid::Uuid;

use super::{Engine, normalize_required_name};
use crate::{EngineError, RegisterCmd, ResultEngine, User, sessions, users};

fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Credential(err.to_string()))
}

fn verify_password(password: &str, stored: &str) -> ResultEngine<bool> {
    let parsed = PasswordHash::new(stored).map_err(|err| EngineError::Credential(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl Engine {
    /// Create a new account.
    ///
    /// The password is stored as an argon2 hash. Username uniqueness is
    /// enforced by the primary key, so concurrent registrations of the same
    /// name cannot both succeed.
    pub async fn register_user(&self, cmd: RegisterCmd) -> ResultEngine<User> {
        if cmd.password != cmd.confirmation {
            return Err(EngineError::PasswordMismatch);
        }
        let username = normalize_required_name(&cmd.username, "username")?;
        let email = cmd.email.trim().to_string();
        let password = hash_password(&cmd.password)?;

        let user = users::ActiveModel {
            username: ActiveValue::Set(username.clone()),
            email: ActiveValue::Set(email.clone()),
            password: ActiveValue::Set(password),
        };
        match user.insert(&self.database).await {
            Ok(_) => Ok(User { username, email }),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(EngineError::UsernameTaken),
                _ => Err(EngineError::Database(err)),
            },
        }
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords produce the same error, so a
    /// caller cannot probe which usernames exist.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let user = users::Entity::find_by_id(username.trim().to_string())
            .one(&self.database)
            .await?;
        let Some(user) = user else {
            return Err(EngineError::InvalidCredentials);
        };
        if !verify_password(password, &user.password)? {
            return Err(EngineError::InvalidCredentials);
        }
        Ok(User::from(user))
    }

    /// Open a session for `username` and return its token.
    pub async fn create_session(&self, username: &str) -> ResultEngine<Uuid> {
        let token = Uuid::new_v4();
        let session = sessions::ActiveModel {
            token: ActiveValue::Set(token.to_string()),
            user_id: ActiveValue::Set(username.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        };
        session.insert(&self.database).await?;
        Ok(token)
    }

    /// Close a session. Unknown tokens are ignored, so logout is idempotent.
    pub async fn destroy_session(&self, token: Uuid) -> ResultEngine<()> {
        sessions::Entity::delete_by_id(token.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Resolve a session token to its user, if the session is still open.
    pub async fn session_user(&self, token: Uuid) -> ResultEngine<Option<User>> {
        let row = sessions::Entity::find_by_id(token.to_string())
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?;
        Ok(row.and_then(|(_, user)| user).map(User::from))
    }

    /// Delete an account together with its recipes, comments and sessions.
    pub async fn delete_user(&self, username: &str) -> ResultEngine<()> {
        let result = users::Entity::delete_by_id(username.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
