//! # REST API for the Journal

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::JournalMapper;
use crate::io::rest::session::SessionUser;
use crate::AppState;
use shared::CreateJournalEntryRequest;

#[derive(Debug, Default, Deserialize)]
pub struct JournalQueryParams {
    pub limit: Option<u32>,
}

/// List journal entries, most recent first
pub async fn list_journal_entries(
    State(state): State<AppState>,
    session: SessionUser,
    Query(params): Query<JournalQueryParams>,
) -> impl IntoResponse {
    info!("GET /api/journal - user: {}, params: {:?}", session.user_id, params);

    match state.journal_service.list_entries(&session.user_id, params.limit).await {
        Ok(entries) => (StatusCode::OK, Json(JournalMapper::to_list_response(entries))).into_response(),
        Err(e) => error_response(e, "Error listing journal entries"),
    }
}

/// Write a journal entry
pub async fn create_journal_entry(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<CreateJournalEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/journal - user: {}, request: {:?}", session.user_id, request);

    let command = JournalMapper::to_command(request);
    match state.journal_service.add_entry(&session.user_id, command).await {
        Ok(entry) => (StatusCode::CREATED, Json(JournalMapper::to_entry_response(entry))).into_response(),
        Err(e) => error_response(e, "Error saving journal entry"),
    }
}

/// Delete a journal entry
pub async fn delete_journal_entry(
    State(state): State<AppState>,
    session: SessionUser,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/journal/{} - user: {}", entry_id, session.user_id);

    match state.journal_service.delete_entry(&session.user_id, &entry_id).await {
        Ok(()) => (StatusCode::OK, Json(JournalMapper::to_delete_response(entry_id))).into_response(),
        Err(e) => error_response(e, "Error deleting journal entry"),
    }
}
