//! Errors raised by the domain layer.
//!
//! Services return `anyhow::Result`; anything that is the caller's fault is
//! wrapped in a [`DomainError`] so the REST layer can pick a status code by
//! downcasting instead of matching on message text.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input was rejected before any store interaction
    #[error("{0}")]
    Validation(String),
    #[error("Baby profile is required")]
    ProfileRequired,
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Vaccination {0} has already been administered")]
    AlreadyAdministered(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound { kind, id: id.into() }
    }
}
