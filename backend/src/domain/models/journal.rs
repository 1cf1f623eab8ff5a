use chrono::{DateTime, NaiveDate, Utc};
use shared::Mood;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub baby_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub content: String,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn generate_id() -> String {
        format!("journal::{}", Uuid::new_v4())
    }
}
