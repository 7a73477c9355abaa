//! Engine operations, grouped by the records they touch.
//!
//! Every multi-step write runs inside a single database transaction via
//! [`with_tx!`]: either the whole operation lands or none of it does.

use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod auth;
mod categories;
mod comments;
mod ingredients;
mod recipes;

pub use recipes::MAX_IMAGE_BYTES;

/// Run `$body` inside a transaction on `$self.database`.
///
/// The body evaluates to a `ResultEngine`; the transaction commits only on
/// `Ok`. Early returns via `?` drop the transaction, which rolls it back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}
pub(crate) use with_tx;

/// Trim a required name-like field, rejecting blank input.
fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional free-text field, mapping blank input to `None`.
fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// The entry point for everything the application can do.
///
/// The engine is stateless apart from the database handle, so it can be
/// shared freely between the HTTP server and the admin tool.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database connection.
    #[must_use]
    pub fn database(mut self, database: DatabaseConnection) -> EngineBuilder {
        self.database = database;
        self
    }

    /// Construct the `Engine`.
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
