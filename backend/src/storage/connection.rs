use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// DbConnection owns the SQLite pool and the schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and set up the schema
    pub async fn init(url: &str) -> Result<Self> {
        info!("Opening database at {}", url);
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Self::from_pool(pool).await
    }

    /// Initialize a private in-memory database for a single test
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // A single connection that never idles out keeps the in-memory
        // database alive for the lifetime of the pool.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::setup_schema(&pool)
            .await
            .context("Failed to set up database schema")?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // One profile per user
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS baby_profiles (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                gender TEXT NOT NULL DEFAULT 'other',
                weight_at_birth REAL,
                height_at_birth REAL,
                avatar_url TEXT,
                current_weight REAL,
                current_height REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS growth_records (
                id TEXT PRIMARY KEY,
                baby_id TEXT NOT NULL,
                date TEXT NOT NULL,
                weight REAL,
                height REAL,
                head_circumference REAL,
                notes TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY (baby_id) REFERENCES baby_profiles (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_growth_records_baby_date
            ON growth_records(baby_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS milestones (
                id TEXT PRIMARY KEY,
                baby_id TEXT NOT NULL,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY (baby_id) REFERENCES baby_profiles (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_milestones_baby_date
            ON milestones(baby_id, date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id TEXT PRIMARY KEY,
                baby_id TEXT NOT NULL,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                content TEXT NOT NULL,
                mood TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (baby_id) REFERENCES baby_profiles (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_journal_entries_baby_date
            ON journal_entries(baby_id, date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vaccinations (
                id TEXT PRIMARY KEY,
                baby_id TEXT NOT NULL,
                name TEXT NOT NULL,
                scheduled_date TEXT NOT NULL,
                administered_date TEXT,
                notes TEXT,
                seed_offset_months INTEGER,
                created_at TEXT NOT NULL,
                FOREIGN KEY (baby_id) REFERENCES baby_profiles (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_vaccinations_baby_scheduled
            ON vaccinations(baby_id, scheduled_date);
            "#,
        )
        .execute(pool)
        .await?;

        // Write-once guard for seeded rows: a standard dose can exist only
        // once per baby no matter how many seeding passes race.
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_vaccinations_seed_slot
            ON vaccinations(baby_id, name, seed_offset_months)
            WHERE seed_offset_months IS NOT NULL;
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
