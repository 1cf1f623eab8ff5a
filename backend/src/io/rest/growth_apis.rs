//! # REST API for Growth Records

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::GrowthMapper;
use crate::io::rest::session::SessionUser;
use crate::AppState;
use shared::CreateGrowthRecordRequest;

/// List growth records, oldest first
pub async fn list_growth_records(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    info!("GET /api/growth - user: {}", session.user_id);

    match state.growth_service.list_records(&session.user_id).await {
        Ok(records) => (StatusCode::OK, Json(GrowthMapper::to_list_response(records))).into_response(),
        Err(e) => error_response(e, "Error listing growth records"),
    }
}

/// Add a growth record
pub async fn create_growth_record(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<CreateGrowthRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/growth - user: {}, request: {:?}", session.user_id, request);

    let command = GrowthMapper::to_command(request);
    match state.growth_service.add_record(&session.user_id, command).await {
        Ok(record) => (StatusCode::CREATED, Json(GrowthMapper::to_record_response(record))).into_response(),
        Err(e) => error_response(e, "Error adding growth record"),
    }
}

/// Chart series for the growth page
pub async fn get_growth_chart(State(state): State<AppState>, session: SessionUser) -> impl IntoResponse {
    info!("GET /api/growth/chart - user: {}", session.user_id);

    match state.growth_service.chart_series(&session.user_id).await {
        Ok(points) => (StatusCode::OK, Json(GrowthMapper::to_chart_response(points))).into_response(),
        Err(e) => error_response(e, "Error building growth chart"),
    }
}
