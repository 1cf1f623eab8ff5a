//! # Baby Tracker Backend
//!
//! Contains all non-UI logic for the baby tracker.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: age and schedule logic, validation, one service per record type
//! - **Storage**: SQLite persistence through SQLx
//! - **IO**: the REST API the web frontend talks to
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Web frontend
//!     ↓
//! IO Layer (REST API, session, mappers)
//!     ↓
//! Domain Layer (business logic, services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Set up the REST API router with CORS and request tracing
//! - Coordinate between domain logic and data persistence

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{
    Clock, DashboardService, GrowthService, JournalService, MilestoneService, ProfileService, SystemClock,
    VaccinationService,
};
use crate::storage::{
    DbConnection, GrowthRepository, JournalRepository, MilestoneRepository, ProfileRepository, VaccinationRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
    pub growth_service: GrowthService,
    pub milestone_service: MilestoneService,
    pub journal_service: JournalService,
    pub vaccination_service: VaccinationService<VaccinationRepository>,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Wire every service onto one database and clock
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>) -> Self {
        let profile_service = ProfileService::new(ProfileRepository::new(db.clone()), clock.clone());
        let growth_service = GrowthService::new(GrowthRepository::new(db.clone()), profile_service.clone());
        let milestone_service = MilestoneService::new(MilestoneRepository::new(db.clone()), profile_service.clone());
        let journal_service = JournalService::new(JournalRepository::new(db.clone()), profile_service.clone());
        let vaccination_service =
            VaccinationService::new(VaccinationRepository::new(db), profile_service.clone(), clock);
        let dashboard_service = DashboardService::new(
            profile_service.clone(),
            growth_service.clone(),
            milestone_service.clone(),
            journal_service.clone(),
            vaccination_service.clone(),
        );

        Self {
            profile_service,
            growth_service,
            milestone_service,
            journal_service,
            vaccination_service,
            dashboard_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::init(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db, Arc::new(SystemClock)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    // CORS setup to allow frontend to make requests
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/profile", get(io::get_profile).put(io::save_profile))
        .route("/profile/age", get(io::get_age))
        .route("/dashboard", get(io::get_dashboard))
        .route("/growth", get(io::list_growth_records).post(io::create_growth_record))
        .route("/growth/chart", get(io::get_growth_chart))
        .route("/milestones", get(io::list_milestones).post(io::create_milestone))
        .route("/milestones/categories", get(io::list_milestone_categories))
        .route("/journal", get(io::list_journal_entries).post(io::create_journal_entry))
        .route("/journal/:id", delete(io::delete_journal_entry))
        .route("/vaccinations", get(io::get_vaccination_schedule).post(io::create_vaccination))
        .route("/vaccinations/standard", get(io::get_standard_schedule))
        .route("/vaccinations/:id/administer", post(io::administer_vaccination));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixed_clock;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn setup_test() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(db, fixed_clock("2024-03-20"));
        create_router(state, "http://localhost:8080").expect("Failed to build router")
    }

    async fn send(app: &Router, method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("X-User-Id", user);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn create_profile(app: &Router, user: &str) {
        let (status, _) = send(
            app,
            "PUT",
            "/api/profile",
            Some(user),
            Some(json!({
                "name": "Ada",
                "date_of_birth": "2024-01-15",
                "gender": "female",
                "weight_at_birth": 3.5,
                "height_at_birth": 50.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_requests_without_session_are_unauthorized() {
        let app = setup_test().await;
        let (status, _) = send(&app, "GET", "/api/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let app = setup_test().await;

        let (status, body) = send(&app, "GET", "/api/profile", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "profile": null }));

        create_profile(&app, "user-1").await;

        let (status, body) = send(&app, "GET", "/api/profile", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["name"], "Ada");
        assert_eq!(body["profile"]["date_of_birth"], "2024-01-15");
        assert_eq!(body["profile"]["gender"], "female");

        let (status, body) = send(&app, "GET", "/api/profile/age", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age"], json!({ "unit": "months", "value": 2 }));
        assert_eq!(body["formatted"], "2 months");

        let (status, _) = send(
            &app,
            "PUT",
            "/api/profile",
            Some("user-1"),
            Some(json!({ "name": "", "date_of_birth": "2024-01-15" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_records_require_profile() {
        let app = setup_test().await;
        let (status, body) = send(&app, "GET", "/api/vaccinations", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Value::String("Baby profile is required".to_string()));

        let (status, body) = send(&app, "GET", "/api/dashboard", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_profile"], false);
    }

    #[tokio::test]
    async fn test_vaccination_flow() {
        let app = setup_test().await;
        create_profile(&app, "user-1").await;

        let (status, body) = send(&app, "GET", "/api/vaccinations", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seeded_count"], 12);
        let upcoming = body["upcoming"].as_array().unwrap();
        assert_eq!(upcoming.len(), 12);
        assert_eq!(upcoming[2]["vaccination"]["name"], "DTaP");
        assert_eq!(upcoming[2]["vaccination"]["scheduled_date"], "2024-03-15");
        assert_eq!(upcoming[2]["overdue"], true);
        assert_eq!(upcoming[2]["scheduled_text"], "March 15, 2024");

        let id = upcoming[0]["vaccination"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/vaccinations/{}/administer", id);
        let (status, body) = send(&app, "POST", &uri, Some("user-1"), Some(json!({ "administered_date": "2024-01-15" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vaccination"]["administered_date"], "2024-01-15");

        let (status, _) = send(&app, "POST", &uri, Some("user-1"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, "POST", "/api/vaccinations/vaccination::nope/administer", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", "/api/vaccinations", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seeded_count"], 0);
        assert_eq!(body["completed"].as_array().unwrap().len(), 1);
        assert_eq!(body["completed"][0]["administered_text"], "Jan 15, 2024");
        assert_eq!(body["upcoming"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_other_users_cannot_administer() {
        let app = setup_test().await;
        create_profile(&app, "user-1").await;
        create_profile(&app, "user-2").await;

        let (_, body) = send(&app, "GET", "/api/vaccinations", Some("user-1"), None).await;
        let id = body["upcoming"][0]["vaccination"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/vaccinations/{}/administer", id);
        let (status, _) = send(&app, "POST", &uri, Some("user-2"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_administer_body_is_never_silently_dropped() {
        let app = setup_test().await;
        create_profile(&app, "user-1").await;

        let (_, body) = send(&app, "GET", "/api/vaccinations", Some("user-1"), None).await;
        let id = body["upcoming"][0]["vaccination"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/vaccinations/{}/administer", id);

        let (status, _) = send(&app, "POST", &uri, Some("user-1"), Some(json!({ "administered_date": 20240116 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/api/vaccinations", Some("user-1"), None).await;
        assert_eq!(body["completed"].as_array().unwrap().len(), 0);

        // A JSON body without a content-type header still carries the date
        let request = Request::builder()
            .method("POST")
            .uri(&uri)
            .header("X-User-Id", "user-1")
            .body(Body::from(r#"{"administered_date":"2024-02-16"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["vaccination"]["administered_date"], "2024-02-16");
    }

    #[tokio::test]
    async fn test_standard_schedule_preview() {
        let app = setup_test().await;
        let (status, body) = send(&app, "GET", "/api/vaccinations/standard?date_of_birth=2024-01-31", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 12);
        assert_eq!(entries[1]["scheduled_date"], "2024-02-29");
        assert_eq!(entries[1]["offset_months"], 1);

        let (status, _) = send(&app, "GET", "/api/vaccinations/standard?date_of_birth=soon", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_growth_milestone_and_journal_routes() {
        let app = setup_test().await;
        create_profile(&app, "user-1").await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/growth",
            Some("user-1"),
            Some(json!({ "date": "2024-03-01", "weight": 5.25, "height": 57.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/api/growth/chart", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"][0]["label"], "03/01/24");

        let (status, _) = send(
            &app,
            "POST",
            "/api/milestones",
            Some("user-1"),
            Some(json!({ "title": "First smile", "date": "2024-02-20", "category": "social" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/api/milestones?category=social", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["milestones"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "GET", "/api/milestones?category=motor", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["milestones"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, "GET", "/api/milestones?category=swimming", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/milestones/categories", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["categories"][2], json!({ "id": "social", "name": "Social & Emotional" }));

        let (status, body) = send(
            &app,
            "POST",
            "/api/journal",
            Some("user-1"),
            Some(json!({ "title": "Bath", "date": "2024-03-02", "content": "Loved the water", "mood": "excited" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["entry"]["mood_label"], "Excited");
        let entry_id = body["entry"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "GET", "/api/dashboard", Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_profile"], true);
        assert_eq!(body["age_text"], "2 months");
        assert_eq!(body["birth_weight_text"], "3.5 kg");
        assert_eq!(body["current_weight_text"], "5.25 kg");
        assert_eq!(body["current_height_text"], "57 cm");
        assert_eq!(body["recent_journal_entries"].as_array().unwrap().len(), 1);

        let uri = format!("/api/journal/{}", entry_id);
        let (status, body) = send(&app, "DELETE", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted_id"], entry_id);

        let (status, _) = send(&app, "DELETE", &uri, Some("user-1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
