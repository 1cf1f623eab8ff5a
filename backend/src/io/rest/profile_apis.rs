//! # REST API for the Baby Profile
//!
//! Reading and saving the signed-in user's baby profile, and the baby's age.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::ProfileMapper;
use crate::io::rest::session::SessionUser;
use crate::AppState;
use shared::SaveProfileRequest;

/// Get the user's profile; `{"profile": null}` before the first save
pub async fn get_profile(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    info!("GET /api/profile - user: {}", session.user_id);

    match state.profile_service.get_profile(&session.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileMapper::to_profile_response(profile))).into_response(),
        Err(e) => error_response(e, "Error retrieving profile"),
    }
}

/// Create or update the user's profile
pub async fn save_profile(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<SaveProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile - user: {}, request: {:?}", session.user_id, request);

    let command = ProfileMapper::to_command(request);
    match state.profile_service.save_profile(&session.user_id, command).await {
        Ok(result) => {
            let status = if result.created { StatusCode::CREATED } else { StatusCode::OK };
            (status, Json(ProfileMapper::to_save_response(result))).into_response()
        }
        Err(e) => error_response(e, "Error saving profile"),
    }
}

/// Get the baby's age as of today
pub async fn get_age(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    info!("GET /api/profile/age - user: {}", session.user_id);

    match state.profile_service.get_age(&session.user_id).await {
        Ok(age) => (StatusCode::OK, Json(ProfileMapper::to_age_response(age))).into_response(),
        Err(e) => error_response(e, "Error calculating age"),
    }
}
