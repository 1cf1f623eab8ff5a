use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::profile::BabyProfile;
use crate::storage::connection::DbConnection;

const PROFILE_COLUMNS: &str = "id, user_id, name, date_of_birth, gender, weight_at_birth, height_at_birth, \
     avatar_url, current_weight, current_height, created_at, updated_at";

/// Repository for baby profiles
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<BabyProfile> {
        Ok(BabyProfile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            date_of_birth: row.try_get("date_of_birth")?,
            gender: row.try_get::<String, _>("gender")?.parse()?,
            weight_at_birth: row.try_get("weight_at_birth")?,
            height_at_birth: row.try_get("height_at_birth")?,
            avatar_url: row.try_get("avatar_url")?,
            current_weight: row.try_get("current_weight")?,
            current_height: row.try_get("current_height")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Get the profile owned by a user, if one exists
    pub async fn get_by_user(&self, user_id: &str) -> Result<Option<BabyProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM baby_profiles WHERE user_id = ?",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    /// Store a new profile. Returns `false` when the user already has one.
    pub async fn store_profile(&self, profile: &BabyProfile) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO baby_profiles (id, user_id, name, date_of_birth, gender, weight_at_birth,
                height_at_birth, avatar_url, current_weight, current_height, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.user_id)
        .bind(&profile.name)
        .bind(profile.date_of_birth)
        .bind(profile.gender.as_str())
        .bind(profile.weight_at_birth)
        .bind(profile.height_at_birth)
        .bind(&profile.avatar_url)
        .bind(profile.current_weight)
        .bind(profile.current_height)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Overwrite the user-editable fields of an existing profile
    pub async fn update_profile(&self, profile: &BabyProfile) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE baby_profiles
            SET name = ?, date_of_birth = ?, gender = ?, weight_at_birth = ?, height_at_birth = ?,
                avatar_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(profile.date_of_birth)
        .bind(profile.gender.as_str())
        .bind(profile.weight_at_birth)
        .bind(profile.height_at_birth)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at)
        .bind(&profile.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Mirror the latest growth measurements onto the profile
    pub async fn update_current_measurements(
        &self,
        baby_id: &str,
        weight: Option<f64>,
        height: Option<f64>,
    ) -> Result<()> {
        sqlx::query("UPDATE baby_profiles SET current_weight = ?, current_height = ? WHERE id = ?")
            .bind(weight)
            .bind(height)
            .bind(baby_id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
