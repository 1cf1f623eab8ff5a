//! # IO Module
//!
//! Provides the interface layer between the web frontend and the domain logic.
//!
//! This module translates HTTP requests into domain operations and formats
//! domain results as the JSON DTOs of the `shared` crate. It owns the
//! boundary between the presentation layer and business logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST endpoints for the profile, growth, milestone,
//!   journal, vaccination and dashboard pages
//! - **Session**: resolving the authenticated user from the request
//! - **Error Translation**: converting domain errors to HTTP status codes
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum
//! - **Serialization**: Serde JSON through the `shared` DTOs
//! - **State Management**: Axum `State` extractor carrying [`AppState`](crate::AppState)

pub mod rest;

pub use rest::*;
