//! The module contains the errors the engine can return.
//!
//! Pledge admission has three expected rejection kinds, checked in order:
//!
//! - [`KeyNotFound`] when the referenced request does not exist.
//! - [`RequestExpired`] when the request deadline has already passed.
//! - [`SelfPledge`] when an account pledges to its own request.
//!
//! [`KeyNotFound`]: EngineError::KeyNotFound
//! [`RequestExpired`]: EngineError::RequestExpired
//! [`SelfPledge`]: EngineError::SelfPledge
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error("Request expired: {0}")]
    RequestExpired(String),
    #[error("Self pledge forbidden: {0}")]
    SelfPledge(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::RequestExpired(a), Self::RequestExpired(b)) => a == b,
            (Self::SelfPledge(a), Self::SelfPledge(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
