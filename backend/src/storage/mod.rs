//! # Storage Module
//!
//! Handles all data persistence for the baby tracker.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite through SQLx, one table per record type
//! - **Scoping**: every record row carries the owning baby profile id
//! - **Repositories**: one per record type, sharing a [`DbConnection`]

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{
    GrowthRepository, JournalRepository, MilestoneRepository, ProfileRepository,
    VaccinationRepository,
};
pub use traits::VaccinationStorage;
