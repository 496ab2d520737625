use crate::{
    domain::Denial,
    errors::{repository::RepositoryError, session::SessionError},
};
use thiserror::Error;

/// A guard either denies the request or passes an infrastructure failure through untouched.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error(transparent)]
    Denied(#[from] Denial),

    #[error("Session provider error: {0}")]
    Session(#[from] SessionError),

    #[error("User store error: {0}")]
    Store(#[from] RepositoryError),
}

impl GuardError {
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            GuardError::Denied(denial) => Some(denial),
            _ => None,
        }
    }
}
