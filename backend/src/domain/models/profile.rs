use chrono::{DateTime, NaiveDate, Utc};
use shared::Gender;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct BabyProfile {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub weight_at_birth: Option<f64>,
    pub height_at_birth: Option<f64>,
    pub avatar_url: Option<String>,
    pub current_weight: Option<f64>,
    pub current_height: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BabyProfile {
    pub fn generate_id() -> String {
        format!("baby::{}", Uuid::new_v4())
    }
}
