use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthRecord {
    pub id: String,
    pub baby_id: String,
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub head_circumference: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GrowthRecord {
    pub fn generate_id() -> String {
        format!("growth::{}", Uuid::new_v4())
    }
}
