use anyhow::Result;
use shared::MilestoneCategory;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::milestone::Milestone;
use crate::storage::connection::DbConnection;

/// Repository for developmental milestones
#[derive(Clone)]
pub struct MilestoneRepository {
    db: DbConnection,
}

impl MilestoneRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<Milestone> {
        Ok(Milestone {
            id: row.try_get("id")?,
            baby_id: row.try_get("baby_id")?,
            title: row.try_get("title")?,
            date: row.try_get("date")?,
            category: row.try_get::<String, _>("category")?.parse()?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Store a milestone
    pub async fn store_milestone(&self, milestone: &Milestone) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO milestones (id, baby_id, title, date, category, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&milestone.id)
        .bind(&milestone.baby_id)
        .bind(&milestone.title)
        .bind(milestone.date)
        .bind(milestone.category.as_str())
        .bind(&milestone.description)
        .bind(milestone.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Milestones for a baby, most recent first, optionally filtered by category
    pub async fn list_milestones(
        &self,
        baby_id: &str,
        category: Option<MilestoneCategory>,
        limit: Option<u32>,
    ) -> Result<Vec<Milestone>> {
        let category = category.map(|c| c.as_str());
        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(i64::from).unwrap_or(-1);

        let rows = sqlx::query(
            r#"
            SELECT id, baby_id, title, date, category, description, created_at
            FROM milestones
            WHERE baby_id = ? AND (? IS NULL OR category = ?)
            ORDER BY date DESC, ROWID DESC
            LIMIT ?
            "#,
        )
        .bind(baby_id)
        .bind(category)
        .bind(category)
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}
