use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::growth::GrowthRecord;
use crate::storage::connection::DbConnection;

/// Repository for growth measurements
#[derive(Clone)]
pub struct GrowthRepository {
    db: DbConnection,
}

impl GrowthRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<GrowthRecord> {
        Ok(GrowthRecord {
            id: row.try_get("id")?,
            baby_id: row.try_get("baby_id")?,
            date: row.try_get("date")?,
            weight: row.try_get("weight")?,
            height: row.try_get("height")?,
            head_circumference: row.try_get("head_circumference")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Store a growth record
    pub async fn store_record(&self, record: &GrowthRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO growth_records (id, baby_id, date, weight, height, head_circumference, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.baby_id)
        .bind(record.date)
        .bind(record.weight)
        .bind(record.height)
        .bind(record.head_circumference)
        .bind(&record.notes)
        .bind(record.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// All records for a baby, oldest first
    pub async fn list_records(&self, baby_id: &str) -> Result<Vec<GrowthRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, baby_id, date, weight, height, head_circumference, notes, created_at
            FROM growth_records
            WHERE baby_id = ?
            ORDER BY date ASC, ROWID ASC
            "#,
        )
        .bind(baby_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    /// Most recent record by measurement date
    pub async fn latest_record(&self, baby_id: &str) -> Result<Option<GrowthRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, baby_id, date, weight, height, head_circumference, notes, created_at
            FROM growth_records
            WHERE baby_id = ?
            ORDER BY date DESC, ROWID DESC
            LIMIT 1
            "#,
        )
        .bind(baby_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }
}
