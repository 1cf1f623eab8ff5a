//! # Storage Traits
//!
//! The vaccination store is the one collaborator the seeding orchestration
//! talks to, so it sits behind a trait: services depend on the abstraction and
//! tests can substitute a store that fails on demand.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::vaccination::Vaccination;

#[async_trait]
pub trait VaccinationStorage: Send + Sync {
    /// All vaccinations for a baby, ascending by scheduled date.
    /// Rows sharing a date keep their insertion order.
    async fn list_vaccinations(&self, baby_id: &str) -> Result<Vec<Vaccination>>;

    /// Number of vaccinations (standard or manual) recorded for a baby
    async fn count_vaccinations(&self, baby_id: &str) -> Result<u64>;

    /// Store a single, manually entered vaccination
    async fn store_vaccination(&self, vaccination: &Vaccination) -> Result<()>;

    /// Insert a batch of seeded vaccinations atomically.
    /// Rows whose seed slot already exists are skipped; returns the number inserted.
    async fn store_seeded_vaccinations(&self, vaccinations: &[Vaccination]) -> Result<usize>;

    /// Retrieve a vaccination belonging to `baby_id`
    async fn get_vaccination(&self, baby_id: &str, vaccination_id: &str) -> Result<Option<Vaccination>>;

    /// Set the administered date if it is still unset.
    /// Returns false when no un-administered row matched.
    async fn mark_administered(&self, baby_id: &str, vaccination_id: &str, date: NaiveDate) -> Result<bool>;

    /// Not yet administered and scheduled on or after `from`, ascending
    async fn list_upcoming(&self, baby_id: &str, from: NaiveDate, limit: u32) -> Result<Vec<Vaccination>>;
}
