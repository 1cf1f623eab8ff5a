//! Conversions between domain models and the `shared` wire DTOs.
//! Dates leave the domain as `YYYY-MM-DD`, timestamps as RFC 3339.

pub mod dashboard_mapper;
pub mod growth_mapper;
pub mod journal_mapper;
pub mod milestone_mapper;
pub mod profile_mapper;
pub mod vaccination_mapper;

pub use dashboard_mapper::DashboardMapper;
pub use growth_mapper::GrowthMapper;
pub use journal_mapper::JournalMapper;
pub use milestone_mapper::MilestoneMapper;
pub use profile_mapper::ProfileMapper;
pub use vaccination_mapper::VaccinationMapper;

use chrono::NaiveDate;

pub(crate) fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
