//! Fixtures shared by unit tests across the storage and domain layers.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shared::Gender;

use crate::domain::clock::{Clock, FixedClock};
use crate::domain::models::profile::BabyProfile;
use crate::storage::{DbConnection, ProfileRepository};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test dates are YYYY-MM-DD")
}

pub fn fixed_clock(today: &str) -> Arc<dyn Clock> {
    Arc::new(FixedClock(date(today)))
}

/// Insert a profile born 2024-01-15 for `user_id` and return its id
pub async fn insert_test_profile(db: &DbConnection, user_id: &str) -> String {
    let now = Utc::now();
    let profile = BabyProfile {
        id: BabyProfile::generate_id(),
        user_id: user_id.to_string(),
        name: "Test Baby".to_string(),
        date_of_birth: date("2024-01-15"),
        gender: Gender::Other,
        weight_at_birth: None,
        height_at_birth: None,
        avatar_url: None,
        current_weight: None,
        current_height: None,
        created_at: now,
        updated_at: now,
    };
    ProfileRepository::new(db.clone())
        .store_profile(&profile)
        .await
        .expect("Failed to insert test profile");
    profile.id
}
