//! # Vaccination Service
//!
//! Owns the vaccination schedule of a baby:
//!
//! - **Seeding**: the first time a baby with no vaccination rows is loaded,
//!   the standard schedule is generated from the date of birth and inserted.
//!   Seeding is write-once per baby. An in-process lock keyed by baby id keeps
//!   two concurrent first loads from both seeding, and the store's unique seed
//!   slot index makes a duplicate insert a no-op even across processes.
//! - **Partitioning**: the stored rows are split into upcoming (with an
//!   overdue flag) and completed.
//! - **Administering**: the only mutation a row ever sees, from no
//!   administered date to a concrete one. There is no undo.

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::vaccination::{AddVaccinationCommand, MarkAdministeredCommand, ScheduleResult};
use crate::domain::errors::DomainError;
use crate::domain::models::profile::BabyProfile;
use crate::domain::models::vaccination::Vaccination;
use crate::domain::profile_service::ProfileService;
use crate::domain::vaccination_partition::partition_vaccinations;
use crate::domain::vaccination_schedule::{generate_standard_schedule, VaccinationCandidate};
use crate::domain::validation::{optional_text, parse_date, required_text};
use crate::storage::VaccinationStorage;

const MAX_NAME_LENGTH: usize = 100;

type SeedingLocks = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

pub struct VaccinationService<S: VaccinationStorage> {
    store: Arc<S>,
    profile_service: ProfileService,
    clock: Arc<dyn Clock>,
    seeding_locks: SeedingLocks,
}

impl<S: VaccinationStorage> Clone for VaccinationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            profile_service: self.profile_service.clone(),
            clock: Arc::clone(&self.clock),
            seeding_locks: Arc::clone(&self.seeding_locks),
        }
    }
}

impl<S: VaccinationStorage> VaccinationService<S> {
    pub fn new(store: S, profile_service: ProfileService, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(store),
            profile_service,
            clock,
            seeding_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Load the user's schedule, seeding the standard one on first load
    pub async fn load_schedule(&self, user_id: &str) -> Result<ScheduleResult> {
        info!("Loading vaccination schedule for user: {}", user_id);

        let profile = self.profile_service.require_profile(user_id).await?;
        let seeded_count = self.seed_standard_schedule(&profile).await?;

        let records = self
            .store
            .list_vaccinations(&profile.id)
            .await
            .context("Failed to load vaccinations")?;
        let partition = partition_vaccinations(records, self.clock.today());

        info!(
            "Vaccination schedule for baby {}: {} upcoming, {} completed",
            profile.id,
            partition.upcoming.len(),
            partition.completed.len()
        );
        Ok(ScheduleResult { partition, seeded_count })
    }

    /// Insert the standard schedule if the baby has no vaccinations at all,
    /// standard or manual. Returns the number of rows inserted.
    pub async fn seed_standard_schedule(&self, baby: &BabyProfile) -> Result<usize> {
        if self.has_vaccinations(&baby.id).await? {
            return Ok(0);
        }

        let slot = self.seeding_slot(&baby.id);
        let _guard = slot.lock.lock().await;

        // Another load may have seeded while this one waited
        if self.has_vaccinations(&baby.id).await? {
            return Ok(0);
        }

        let now = Utc::now();
        let rows: Vec<Vaccination> = generate_standard_schedule(baby.date_of_birth)
            .into_iter()
            .map(|candidate| candidate.into_vaccination(&baby.id, now))
            .collect();

        match self.store.store_seeded_vaccinations(&rows).await {
            Ok(inserted) => {
                info!("Seeded {} standard vaccinations for baby {}", inserted, baby.id);
                Ok(inserted)
            }
            Err(e) => {
                error!("Failed to seed vaccination schedule for baby {}: {}", baby.id, e);
                Err(e.context(format!("Failed to seed vaccination schedule for baby {}", baby.id)))
            }
        }
    }

    /// Standard schedule for a date of birth, without touching the store
    pub fn preview_standard_schedule(&self, date_of_birth: &str) -> Result<Vec<VaccinationCandidate>> {
        let date_of_birth = parse_date("Date of birth", date_of_birth)?;
        Ok(generate_standard_schedule(date_of_birth))
    }

    /// Manually add a vaccination to the user's schedule
    pub async fn add_vaccination(&self, user_id: &str, command: AddVaccinationCommand) -> Result<Vaccination> {
        info!("Adding vaccination for user {}: {}", user_id, command.name);

        let name = required_text("Vaccine name", &command.name, MAX_NAME_LENGTH)?;
        let scheduled_date = parse_date("Scheduled date", &command.scheduled_date)?;
        let profile = self.profile_service.require_profile(user_id).await?;

        let vaccination = Vaccination {
            id: Vaccination::generate_id(),
            baby_id: profile.id,
            name,
            scheduled_date,
            administered_date: None,
            notes: optional_text(command.notes),
            seed_offset_months: None,
            created_at: Utc::now(),
        };

        self.store
            .store_vaccination(&vaccination)
            .await
            .context("Failed to store vaccination")?;

        info!("Created vaccination {} with ID: {}", vaccination.name, vaccination.id);
        Ok(vaccination)
    }

    /// Record that a dose was given. Defaults to today; dates in the future
    /// are rejected and a dose can only be administered once.
    pub async fn mark_administered(&self, user_id: &str, command: MarkAdministeredCommand) -> Result<Vaccination> {
        info!("Marking vaccination administered: {}", command.vaccination_id);

        let today = self.clock.today();
        let administered_date = match command.administered_date.as_deref() {
            Some(value) => parse_date("Administered date", value)?,
            None => today,
        };
        if administered_date > today {
            return Err(DomainError::validation("Administered date cannot be in the future").into());
        }

        let profile = self.profile_service.require_profile(user_id).await?;
        let id = command.vaccination_id;

        let updated = self
            .store
            .mark_administered(&profile.id, &id, administered_date)
            .await
            .context("Failed to update vaccination")?;

        let current = self
            .store
            .get_vaccination(&profile.id, &id)
            .await
            .context("Failed to load vaccination")?;

        match (updated, current) {
            (true, Some(vaccination)) => {
                info!("Vaccination {} administered on {}", id, administered_date);
                Ok(vaccination)
            }
            (false, Some(_)) => {
                warn!("Vaccination already administered: {}", id);
                Err(DomainError::AlreadyAdministered(id).into())
            }
            (_, None) => {
                warn!("Vaccination not found: {}", id);
                Err(DomainError::not_found("Vaccination", id).into())
            }
        }
    }

    /// Next doses due for the user's baby, soonest first
    pub async fn upcoming_preview(&self, user_id: &str, limit: u32) -> Result<Vec<Vaccination>> {
        let profile = self.profile_service.require_profile(user_id).await?;
        self.upcoming_for_baby(&profile.id, limit).await
    }

    pub async fn upcoming_for_baby(&self, baby_id: &str, limit: u32) -> Result<Vec<Vaccination>> {
        self.store
            .list_upcoming(baby_id, self.clock.today(), limit)
            .await
            .context("Failed to load upcoming vaccinations")
    }

    async fn has_vaccinations(&self, baby_id: &str) -> Result<bool> {
        let existing = self
            .store
            .count_vaccinations(baby_id)
            .await
            .context("Failed to count vaccinations")?;
        Ok(existing > 0)
    }

    fn seeding_slot(&self, baby_id: &str) -> SeedingSlot {
        let mut locks = self
            .seeding_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let lock = Arc::clone(locks.entry(baby_id.to_string()).or_default());
        SeedingSlot {
            locks: Arc::clone(&self.seeding_locks),
            baby_id: baby_id.to_string(),
            lock,
        }
    }
}

/// A caller's claim on a baby's seeding lock. The map entry is removed when
/// the last claim is dropped.
struct SeedingSlot {
    locks: SeedingLocks,
    baby_id: String,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for SeedingSlot {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // One reference lives in the map, the other in this slot
        if Arc::strong_count(&self.lock) <= 2 {
            locks.remove(&self.baby_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, ProfileRepository, VaccinationRepository};
    use crate::test_support::{date, fixed_clock, insert_test_profile};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    async fn setup_test(today: &str) -> VaccinationService<VaccinationRepository> {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        insert_test_profile(&db, "user-1").await;
        let clock = fixed_clock(today);
        let profile_service = ProfileService::new(ProfileRepository::new(db.clone()), clock.clone());
        VaccinationService::new(VaccinationRepository::new(db), profile_service, clock)
    }

    fn manual(name: &str, scheduled: &str) -> AddVaccinationCommand {
        AddVaccinationCommand {
            name: name.to_string(),
            scheduled_date: scheduled.to_string(),
            notes: None,
        }
    }

    fn administer(id: &str, date: Option<&str>) -> MarkAdministeredCommand {
        MarkAdministeredCommand {
            vaccination_id: id.to_string(),
            administered_date: date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_first_load_seeds_standard_schedule() {
        // Profile born 2024-01-15
        let service = setup_test("2024-03-20").await;
        let result = service.load_schedule("user-1").await.unwrap();

        assert_eq!(result.seeded_count, 12);
        assert_eq!(result.partition.upcoming.len(), 12);
        assert!(result.partition.completed.is_empty());

        let upcoming = &result.partition.upcoming;
        assert_eq!(upcoming[1].vaccination.scheduled_date, date("2024-02-15"));
        assert_eq!(upcoming[2].vaccination.name, "DTaP");
        assert_eq!(upcoming[2].vaccination.scheduled_date, date("2024-03-15"));
        assert!(upcoming[..7].iter().all(|u| u.overdue));
        assert!(upcoming[7..].iter().all(|u| !u.overdue));
    }

    #[tokio::test]
    async fn test_second_load_inserts_nothing() {
        let service = setup_test("2024-03-20").await;
        assert_eq!(service.load_schedule("user-1").await.unwrap().seeded_count, 12);

        let second = service.load_schedule("user-1").await.unwrap();
        assert_eq!(second.seeded_count, 0);
        assert_eq!(second.partition.upcoming.len(), 12);
    }

    #[tokio::test]
    async fn test_manual_entry_prevents_seeding() {
        let service = setup_test("2024-03-20").await;
        service.add_vaccination("user-1", manual("Flu", "2024-10-01")).await.unwrap();

        let result = service.load_schedule("user-1").await.unwrap();
        assert_eq!(result.seeded_count, 0);
        assert_eq!(result.partition.upcoming.len(), 1);
        assert_eq!(result.partition.upcoming[0].vaccination.name, "Flu");
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_seed_once() {
        let service = setup_test("2024-03-20").await;
        let (first, second) = tokio::join!(service.load_schedule("user-1"), service.load_schedule("user-1"));
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.seeded_count + second.seeded_count, 12);
        assert_eq!(service.load_schedule("user-1").await.unwrap().partition.upcoming.len(), 12);
    }

    fn seeding_lock_count<S: VaccinationStorage>(service: &VaccinationService<S>) -> usize {
        service.seeding_locks.lock().unwrap().len()
    }

    #[tokio::test]
    async fn test_seeding_locks_are_released_after_load() {
        let service = setup_test("2024-03-20").await;
        let (first, second) = tokio::join!(service.load_schedule("user-1"), service.load_schedule("user-1"));
        first.unwrap();
        second.unwrap();
        assert_eq!(seeding_lock_count(&service), 0);

        service.load_schedule("user-1").await.unwrap();
        assert_eq!(seeding_lock_count(&service), 0);
    }

    #[tokio::test]
    async fn test_load_requires_profile() {
        let service = setup_test("2024-03-20").await;
        let err = service.load_schedule("user-2").await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::ProfileRequired));
    }

    #[tokio::test]
    async fn test_mark_administered_moves_to_completed() {
        let service = setup_test("2024-03-20").await;
        let loaded = service.load_schedule("user-1").await.unwrap();
        let hep_b = loaded.partition.upcoming[0].vaccination.id.clone();

        let updated = service
            .mark_administered("user-1", administer(&hep_b, Some("2024-01-16")))
            .await
            .unwrap();
        assert_eq!(updated.administered_date, Some(date("2024-01-16")));

        let reloaded = service.load_schedule("user-1").await.unwrap();
        assert_eq!(reloaded.partition.completed.len(), 1);
        assert_eq!(reloaded.partition.completed[0].id, hep_b);
        assert_eq!(reloaded.partition.upcoming.len(), 11);
    }

    #[tokio::test]
    async fn test_mark_administered_defaults_to_today_and_is_one_way() {
        let service = setup_test("2024-03-20").await;
        let vaccination = service.add_vaccination("user-1", manual("MMR", "2024-03-01")).await.unwrap();

        let updated = service
            .mark_administered("user-1", administer(&vaccination.id, None))
            .await
            .unwrap();
        assert_eq!(updated.administered_date, Some(date("2024-03-20")));

        let err = service
            .mark_administered("user-1", administer(&vaccination.id, Some("2024-03-02")))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::AlreadyAdministered(vaccination.id.clone()))
        );
    }

    #[tokio::test]
    async fn test_mark_administered_rejects_future_and_unknown() {
        let service = setup_test("2024-03-20").await;
        let vaccination = service.add_vaccination("user-1", manual("MMR", "2024-03-01")).await.unwrap();

        let err = service
            .mark_administered("user-1", administer(&vaccination.id, Some("2024-03-21")))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::validation("Administered date cannot be in the future"))
        );

        let err = service
            .mark_administered("user-1", administer("vaccination::missing", None))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::not_found("Vaccination", "vaccination::missing"))
        );
    }

    #[tokio::test]
    async fn test_add_vaccination_validation() {
        let service = setup_test("2024-03-20").await;
        let err = service.add_vaccination("user-1", manual(" ", "2024-03-01")).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::validation("Vaccine name cannot be empty"))
        );

        let err = service.add_vaccination("user-1", manual("MMR", "March 1st")).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::validation(
                "Scheduled date must be a valid date in YYYY-MM-DD format"
            ))
        );
    }

    #[tokio::test]
    async fn test_upcoming_preview_skips_past_doses() {
        let service = setup_test("2024-03-20").await;
        service.load_schedule("user-1").await.unwrap();

        let upcoming = service.upcoming_preview("user-1", 3).await.unwrap();
        assert_eq!(upcoming.len(), 3);
        assert!(upcoming.iter().all(|v| v.scheduled_date == date("2024-05-15")));
        assert_eq!(upcoming[0].name, "DTaP");
    }

    #[tokio::test]
    async fn test_preview_standard_schedule() {
        let service = setup_test("2024-03-20").await;
        let preview = service.preview_standard_schedule("2023-12-31").unwrap();
        assert_eq!(preview.len(), 12);
        assert_eq!(preview[2].scheduled_date, date("2024-02-29"));
        assert!(service.preview_standard_schedule("yesterday").is_err());
    }

    /// Store whose seeding insert always fails
    struct FailingSeedStore;

    #[async_trait]
    impl VaccinationStorage for FailingSeedStore {
        async fn list_vaccinations(&self, _baby_id: &str) -> Result<Vec<Vaccination>> {
            Ok(Vec::new())
        }

        async fn count_vaccinations(&self, _baby_id: &str) -> Result<u64> {
            Ok(0)
        }

        async fn store_vaccination(&self, _vaccination: &Vaccination) -> Result<()> {
            Ok(())
        }

        async fn store_seeded_vaccinations(&self, _vaccinations: &[Vaccination]) -> Result<usize> {
            Err(anyhow::anyhow!("disk I/O error"))
        }

        async fn get_vaccination(&self, _baby_id: &str, _vaccination_id: &str) -> Result<Option<Vaccination>> {
            Ok(None)
        }

        async fn mark_administered(&self, _baby_id: &str, _vaccination_id: &str, _date: NaiveDate) -> Result<bool> {
            Ok(false)
        }

        async fn list_upcoming(&self, _baby_id: &str, _from: NaiveDate, _limit: u32) -> Result<Vec<Vaccination>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_seeding_failure_is_reported() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        insert_test_profile(&db, "user-1").await;
        let clock = fixed_clock("2024-03-20");
        let profile_service = ProfileService::new(ProfileRepository::new(db), clock.clone());
        let service = VaccinationService::new(FailingSeedStore, profile_service, clock);

        let err = service.load_schedule("user-1").await.unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_none());
        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to seed vaccination schedule"));
        assert!(chain.contains("disk I/O error"));
        assert_eq!(seeding_lock_count(&service), 0);
    }
}
