//! The module contains the errors the engine can throw.
//!
//! Validation errors carry the exact message shown to the person filling
//! the form; the server forwards them verbatim. [`Database`] and
//! [`Credential`] wrap backend failures and are never shown as-is.
//!
//!  [`Database`]: EngineError::Database
//!  [`Credential`]: EngineError::Credential
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Title is required.")]
    TitleRequired,
    #[error("Preparation instructions are required.")]
    PreparationRequired,
    #[error("Image must be smaller than 2 MB. Please choose a smaller file.")]
    ImageTooLarge,
    #[error("Passwords must match.")]
    PasswordMismatch,
    #[error("Username already taken.")]
    UsernameTaken,
    // One message for both unknown user and wrong password.
    #[error("Invalid username and/or password.")]
    InvalidCredentials,
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("credential backend error: {0}")]
    Credential(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TitleRequired, Self::TitleRequired) => true,
            (Self::PreparationRequired, Self::PreparationRequired) => true,
            (Self::ImageTooLarge, Self::ImageTooLarge) => true,
            (Self::PasswordMismatch, Self::PasswordMismatch) => true,
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Credential(a), Self::Credential(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
