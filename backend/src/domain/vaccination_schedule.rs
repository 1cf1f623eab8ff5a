//! Standard immunization calendar.
//!
//! Pure and deterministic: the same date of birth always yields the same
//! twelve candidates in the same order. Persisting them is the job of
//! [`VaccinationService`](super::vaccination_service::VaccinationService).

use chrono::{DateTime, NaiveDate, Utc};

use super::age::add_months;
use super::models::vaccination::Vaccination;

/// One row of the standard schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardDose {
    pub name: &'static str,
    pub offset_months: u32,
    pub notes: &'static str,
}

const fn dose(name: &'static str, offset_months: u32, notes: &'static str) -> StandardDose {
    StandardDose {
        name,
        offset_months,
        notes,
    }
}

pub const STANDARD_SCHEDULE: [StandardDose; 12] = [
    dose("Hepatitis B (HepB)", 0, "First dose at birth"),
    dose("Hepatitis B (HepB)", 1, "Second dose"),
    dose("DTaP", 2, "First dose"),
    dose("IPV (Polio)", 2, "First dose"),
    dose("Hib", 2, "First dose"),
    dose("PCV13", 2, "First dose"),
    dose("RV (Rotavirus)", 2, "First dose"),
    dose("DTaP", 4, "Second dose"),
    dose("IPV (Polio)", 4, "Second dose"),
    dose("Hib", 4, "Second dose"),
    dose("PCV13", 4, "Second dose"),
    dose("RV (Rotavirus)", 4, "Second dose"),
];

/// A standard dose materialized against a date of birth. Never administered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationCandidate {
    pub name: String,
    pub scheduled_date: NaiveDate,
    pub offset_months: u32,
    pub notes: String,
}

impl VaccinationCandidate {
    pub fn into_vaccination(self, baby_id: &str, created_at: DateTime<Utc>) -> Vaccination {
        Vaccination {
            id: Vaccination::generate_id(),
            baby_id: baby_id.to_string(),
            name: self.name,
            scheduled_date: self.scheduled_date,
            administered_date: None,
            notes: Some(self.notes),
            seed_offset_months: Some(self.offset_months),
            created_at,
        }
    }
}

pub fn generate_standard_schedule(date_of_birth: NaiveDate) -> Vec<VaccinationCandidate> {
    STANDARD_SCHEDULE
        .iter()
        .map(|dose| VaccinationCandidate {
            name: dose.name.to_string(),
            scheduled_date: add_months(date_of_birth, dose.offset_months),
            offset_months: dose.offset_months,
            notes: dose.notes.to_string(),
        })
        .collect()
}
