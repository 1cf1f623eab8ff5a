//! # REST API for the Vaccination Schedule

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::VaccinationMapper;
use crate::io::rest::session::SessionUser;
use crate::AppState;
use shared::{CreateVaccinationRequest, MarkAdministeredRequest};

#[derive(Debug, Deserialize)]
pub struct StandardScheduleParams {
    pub date_of_birth: String,
}

/// Load the schedule, seeding the standard vaccinations on first load
pub async fn get_vaccination_schedule(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    info!("GET /api/vaccinations - user: {}", session.user_id);

    match state.vaccination_service.load_schedule(&session.user_id).await {
        Ok(result) => (StatusCode::OK, Json(VaccinationMapper::to_schedule_response(result))).into_response(),
        Err(e) => error_response(e, "Error loading vaccination schedule"),
    }
}

/// Manually add a vaccination
pub async fn create_vaccination(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<CreateVaccinationRequest>,
) -> impl IntoResponse {
    info!("POST /api/vaccinations - user: {}, request: {:?}", session.user_id, request);

    let command = VaccinationMapper::to_command(request);
    match state.vaccination_service.add_vaccination(&session.user_id, command).await {
        Ok(vaccination) => (
            StatusCode::CREATED,
            Json(VaccinationMapper::to_vaccination_response(
                vaccination,
                "Vaccination added successfully",
            )),
        )
            .into_response(),
        Err(e) => error_response(e, "Error adding vaccination"),
    }
}

/// Read the optional administer body. Only an empty body means "today"; any
/// body that is present must be a valid request.
fn parse_administer_body(body: &[u8]) -> Result<MarkAdministeredRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MarkAdministeredRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {}", e))
}

/// Mark a vaccination as administered. The body is optional; without a date
/// the dose is recorded as given today.
pub async fn administer_vaccination(
    State(state): State<AppState>,
    session: SessionUser,
    Path(vaccination_id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    info!("POST /api/vaccinations/{}/administer - user: {}", vaccination_id, session.user_id);

    let request = match parse_administer_body(&body) {
        Ok(request) => request,
        Err(message) => {
            warn!("Rejecting administer request for {}: {}", vaccination_id, message);
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };
    let command = VaccinationMapper::to_administer_command(vaccination_id, request);
    match state.vaccination_service.mark_administered(&session.user_id, command).await {
        Ok(vaccination) => (
            StatusCode::OK,
            Json(VaccinationMapper::to_vaccination_response(
                vaccination,
                "Vaccination marked as administered",
            )),
        )
            .into_response(),
        Err(e) => error_response(e, "Error updating vaccination"),
    }
}

/// Preview of the standard schedule for a date of birth; nothing is stored
pub async fn get_standard_schedule(
    State(state): State<AppState>,
    Query(params): Query<StandardScheduleParams>,
) -> impl IntoResponse {
    info!("GET /api/vaccinations/standard - date_of_birth: {}", params.date_of_birth);

    match state.vaccination_service.preview_standard_schedule(&params.date_of_birth) {
        Ok(candidates) => (
            StatusCode::OK,
            Json(VaccinationMapper::to_standard_schedule_response(candidates)),
        )
            .into_response(),
        Err(e) => error_response(e, "Error generating standard schedule"),
    }
}
