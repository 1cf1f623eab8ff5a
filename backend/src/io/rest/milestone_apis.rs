//! # REST API for Milestones

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::commands::milestone::MilestoneListQuery;
use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::MilestoneMapper;
use crate::io::rest::session::SessionUser;
use crate::AppState;
use shared::{CreateMilestoneRequest, MilestoneCategory};

#[derive(Debug, Default, Deserialize)]
pub struct MilestoneQueryParams {
    pub category: Option<String>,
    pub limit: Option<u32>,
}

/// List milestones, most recent first, optionally filtered by `?category=`
pub async fn list_milestones(
    State(state): State<AppState>,
    session: SessionUser,
    Query(params): Query<MilestoneQueryParams>,
) -> impl IntoResponse {
    info!("GET /api/milestones - user: {}, params: {:?}", session.user_id, params);

    let category = match params.category.as_deref().filter(|c| !c.is_empty() && *c != "all") {
        Some(value) => match value.parse::<MilestoneCategory>() {
            Ok(category) => Some(category),
            Err(e) => {
                warn!("Rejecting milestone filter: {}", e);
                return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
        },
        None => None,
    };

    let query = MilestoneListQuery {
        category,
        limit: params.limit,
    };
    match state.milestone_service.list_milestones(&session.user_id, query).await {
        Ok(milestones) => (StatusCode::OK, Json(MilestoneMapper::to_list_response(milestones))).into_response(),
        Err(e) => error_response(e, "Error listing milestones"),
    }
}

/// Add a milestone
pub async fn create_milestone(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<CreateMilestoneRequest>,
) -> impl IntoResponse {
    info!("POST /api/milestones - user: {}, request: {:?}", session.user_id, request);

    let command = MilestoneMapper::to_command(request);
    match state.milestone_service.add_milestone(&session.user_id, command).await {
        Ok(milestone) => (StatusCode::CREATED, Json(MilestoneMapper::to_milestone_response(milestone))).into_response(),
        Err(e) => error_response(e, "Error adding milestone"),
    }
}

/// Categories with their display names
pub async fn list_milestone_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/milestones/categories");

    let categories = state.milestone_service.categories();
    (StatusCode::OK, Json(MilestoneMapper::to_categories_response(categories))).into_response()
}
