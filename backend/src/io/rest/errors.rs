use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::DomainError;

/// Status code for an error raised by the domain layer
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::ProfileRequired | DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::AlreadyAdministered(_) => StatusCode::CONFLICT,
    }
}

/// Turn a service error into a response.
///
/// Domain errors carry a message meant for the user. Anything else is a store
/// or internal failure: the cause is logged and the client gets `fallback`.
pub fn error_response(err: anyhow::Error, fallback: &'static str) -> Response {
    match err.downcast_ref::<DomainError>() {
        Some(domain_error) => {
            warn!("{}: {}", fallback, domain_error);
            (status_for(domain_error), domain_error.to_string()).into_response()
        }
        None => {
            error!("{}: {:#}", fallback, err);
            (StatusCode::INTERNAL_SERVER_ERROR, fallback).into_response()
        }
    }
}
