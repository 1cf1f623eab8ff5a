use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Vaccination {
    pub id: String,
    pub baby_id: String,
    pub name: String,
    pub scheduled_date: NaiveDate,
    /// `None` until the dose is given; set exactly once
    pub administered_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Offset from birth for rows created by schedule seeding, `None` for
    /// manual entries. Part of the store's uniqueness key for seeded rows.
    pub seed_offset_months: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Vaccination {
    pub fn generate_id() -> String {
        format!("vaccination::{}", Uuid::new_v4())
    }

    pub fn is_administered(&self) -> bool {
        self.administered_date.is_some()
    }
}
