use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use crate::domain::models::vaccination::Vaccination;
use crate::storage::connection::DbConnection;
use crate::storage::traits::VaccinationStorage;

/// SQLite-backed vaccination store
#[derive(Clone)]
pub struct VaccinationRepository {
    db: DbConnection,
}

impl VaccinationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<Vaccination> {
        let seed_offset_months = row
            .try_get::<Option<i64>, _>("seed_offset_months")?
            .map(u32::try_from)
            .transpose()?;

        Ok(Vaccination {
            id: row.try_get("id")?,
            baby_id: row.try_get("baby_id")?,
            name: row.try_get("name")?,
            scheduled_date: row.try_get("scheduled_date")?,
            administered_date: row.try_get("administered_date")?,
            notes: row.try_get("notes")?,
            seed_offset_months,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl VaccinationStorage for VaccinationRepository {
    async fn list_vaccinations(&self, baby_id: &str) -> Result<Vec<Vaccination>> {
        let rows = sqlx::query(
            r#"
            SELECT id, baby_id, name, scheduled_date, administered_date, notes, seed_offset_months, created_at
            FROM vaccinations
            WHERE baby_id = ?
            ORDER BY scheduled_date ASC, ROWID ASC
            "#,
        )
        .bind(baby_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn count_vaccinations(&self, baby_id: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vaccinations WHERE baby_id = ?")
            .bind(baby_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(u64::try_from(count)?)
    }

    async fn store_vaccination(&self, vaccination: &Vaccination) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vaccinations (id, baby_id, name, scheduled_date, administered_date, notes, seed_offset_months, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vaccination.id)
        .bind(&vaccination.baby_id)
        .bind(&vaccination.name)
        .bind(vaccination.scheduled_date)
        .bind(vaccination.administered_date)
        .bind(&vaccination.notes)
        .bind(vaccination.seed_offset_months.map(i64::from))
        .bind(vaccination.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn store_seeded_vaccinations(&self, vaccinations: &[Vaccination]) -> Result<usize> {
        let mut tx = self.db.pool().begin().await?;
        let mut inserted = 0u64;

        for vaccination in vaccinations {
            // The partial unique index on (baby_id, name, seed_offset_months)
            // turns a duplicate seed slot into a no-op.
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO vaccinations (id, baby_id, name, scheduled_date, administered_date, notes, seed_offset_months, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&vaccination.id)
            .bind(&vaccination.baby_id)
            .bind(&vaccination.name)
            .bind(vaccination.scheduled_date)
            .bind(vaccination.administered_date)
            .bind(&vaccination.notes)
            .bind(vaccination.seed_offset_months.map(i64::from))
            .bind(vaccination.created_at)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        debug!("Seeded {} of {} vaccinations", inserted, vaccinations.len());
        Ok(usize::try_from(inserted)?)
    }

    async fn get_vaccination(&self, baby_id: &str, vaccination_id: &str) -> Result<Option<Vaccination>> {
        let row = sqlx::query(
            r#"
            SELECT id, baby_id, name, scheduled_date, administered_date, notes, seed_offset_months, created_at
            FROM vaccinations
            WHERE id = ? AND baby_id = ?
            "#,
        )
        .bind(vaccination_id)
        .bind(baby_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn mark_administered(&self, baby_id: &str, vaccination_id: &str, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vaccinations
            SET administered_date = ?
            WHERE id = ? AND baby_id = ? AND administered_date IS NULL
            "#,
        )
        .bind(date)
        .bind(vaccination_id)
        .bind(baby_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_upcoming(&self, baby_id: &str, from: NaiveDate, limit: u32) -> Result<Vec<Vaccination>> {
        let rows = sqlx::query(
            r#"
            SELECT id, baby_id, name, scheduled_date, administered_date, notes, seed_offset_months, created_at
            FROM vaccinations
            WHERE baby_id = ? AND administered_date IS NULL AND scheduled_date >= ?
            ORDER BY scheduled_date ASC, ROWID ASC
            LIMIT ?
            "#,
        )
        .bind(baby_id)
        .bind(from)
        .bind(i64::from(limit))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}
