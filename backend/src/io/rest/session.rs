//! Session context for handlers.
//!
//! Authentication happens in the gateway in front of this service, which
//! forwards the signed-in user's id in the `X-User-Id` header.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::warn;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user_id {
            Some(user_id) => Ok(SessionUser {
                user_id: user_id.to_string(),
            }),
            None => {
                warn!("Rejecting {} {}: no session user", parts.method, parts.uri.path());
                Err((StatusCode::UNAUTHORIZED, "Authentication required"))
            }
        }
    }
}
