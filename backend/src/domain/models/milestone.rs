use chrono::{DateTime, NaiveDate, Utc};
use shared::MilestoneCategory;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub baby_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub category: MilestoneCategory,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Milestone {
    pub fn generate_id() -> String {
        format!("milestone::{}", Uuid::new_v4())
    }
}
