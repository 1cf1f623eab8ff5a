//! # Domain Module
//!
//! Contains all business logic for the baby tracker.
//!
//! This module encapsulates the rules for how a baby's records are validated,
//! derived and scheduled. It operates independently of HTTP and of the SQLite
//! layout; services talk to storage through repositories and, for
//! vaccinations, through the [`VaccinationStorage`](crate::storage::VaccinationStorage) trait.
//!
//! ## Module Organization
//!
//! - **age**: calendar-month arithmetic and the days/weeks/months/years age buckets
//! - **units**: weight, length and date text used by the pages
//! - **vaccination_schedule**: the standard immunization table and its generator
//! - **vaccination_partition**: upcoming/completed split with the overdue flag
//! - **\*_service**: one service per record type plus the dashboard summary
//! - **commands**: raw inputs handed to services by the REST layer
//!
//! ## Business Rules
//!
//! - Each user owns at most one baby profile; every record is scoped to it
//! - A profile's date of birth is never in the future
//! - Month offsets add calendar months, clamped to the last day of the target month
//! - The standard vaccination schedule is seeded once, only for a baby with no vaccinations
//! - A vaccination moves from upcoming to completed exactly once and never back
//! - "Today" always comes from the injected [`Clock`](clock::Clock)

pub mod age;
pub mod clock;
pub mod commands;
pub mod dashboard_service;
pub mod errors;
pub mod growth_service;
pub mod journal_service;
pub mod milestone_service;
pub mod models;
pub mod profile_service;
pub mod units;
pub mod vaccination_partition;
pub mod vaccination_schedule;
pub mod vaccination_service;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use dashboard_service::DashboardService;
pub use errors::DomainError;
pub use growth_service::GrowthService;
pub use journal_service::JournalService;
pub use milestone_service::MilestoneService;
pub use profile_service::ProfileService;
pub use vaccination_service::VaccinationService;
