use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::journal::JournalEntry;
use crate::storage::connection::DbConnection;

/// Repository for journal entries
#[derive(Clone)]
pub struct JournalRepository {
    db: DbConnection,
}

impl JournalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<JournalEntry> {
        Ok(JournalEntry {
            id: row.try_get("id")?,
            baby_id: row.try_get("baby_id")?,
            title: row.try_get("title")?,
            date: row.try_get("date")?,
            content: row.try_get("content")?,
            mood: row.try_get::<String, _>("mood")?.parse()?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Store a journal entry
    pub async fn store_entry(&self, entry: &JournalEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (id, baby_id, title, date, content, mood, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.baby_id)
        .bind(&entry.title)
        .bind(entry.date)
        .bind(&entry.content)
        .bind(entry.mood.as_str())
        .bind(entry.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Entries for a baby, most recent first
    pub async fn list_entries(&self, baby_id: &str, limit: Option<u32>) -> Result<Vec<JournalEntry>> {
        let limit = limit.map(i64::from).unwrap_or(-1);
        let rows = sqlx::query(
            r#"
            SELECT id, baby_id, title, date, content, mood, created_at
            FROM journal_entries
            WHERE baby_id = ?
            ORDER BY date DESC, ROWID DESC
            LIMIT ?
            "#,
        )
        .bind(baby_id)
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    /// Delete an entry belonging to `baby_id`.
    /// Returns true if the entry was found and deleted.
    pub async fn delete_entry(&self, baby_id: &str, entry_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ? AND baby_id = ?")
            .bind(entry_id)
            .bind(baby_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
