//! # REST API for the Dashboard

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::DashboardMapper;
use crate::io::rest::session::SessionUser;
use crate::AppState;

/// Summary of the baby's profile and most recent records
pub async fn get_dashboard(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    info!("GET /api/dashboard - user: {}", session.user_id);

    match state.dashboard_service.dashboard(&session.user_id).await {
        Ok(dashboard) => (StatusCode::OK, Json(DashboardMapper::to_response(dashboard))).into_response(),
        Err(e) => error_response(e, "Error loading dashboard"),
    }
}
