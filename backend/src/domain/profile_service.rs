use anyhow::{Context, Result};
use chrono::Utc;
use shared::AgeDisplay;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::age::compute_age;
use crate::domain::clock::Clock;
use crate::domain::commands::profile::SaveProfileCommand;
use crate::domain::errors::DomainError;
use crate::domain::models::profile::BabyProfile;
use crate::domain::validation::{optional_text, parse_date, positive_measurement, required_text};
use crate::storage::ProfileRepository;

const MAX_NAME_LENGTH: usize = 100;

/// Outcome of saving a profile
#[derive(Debug, Clone)]
pub struct SaveProfileResult {
    pub profile: BabyProfile,
    /// True when this save created the profile
    pub created: bool,
}

/// Service for the signed-in user's baby profile.
///
/// Every other service resolves the baby through [`ProfileService::require_profile`],
/// which is what scopes all records to the session user.
#[derive(Clone)]
pub struct ProfileService {
    repository: ProfileRepository,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(repository: ProfileRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Profile owned by `user_id`. `None` is an expected state, not an error.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<BabyProfile>> {
        info!("Getting profile for user: {}", user_id);
        self.repository
            .get_by_user(user_id)
            .await
            .context("Failed to load baby profile")
    }

    /// Profile owned by `user_id`, or [`DomainError::ProfileRequired`]
    pub async fn require_profile(&self, user_id: &str) -> Result<BabyProfile> {
        match self.get_profile(user_id).await? {
            Some(profile) => Ok(profile),
            None => {
                warn!("No baby profile for user: {}", user_id);
                Err(DomainError::ProfileRequired.into())
            }
        }
    }

    /// Create the profile on first save, update it afterwards
    pub async fn save_profile(&self, user_id: &str, command: SaveProfileCommand) -> Result<SaveProfileResult> {
        info!("Saving profile for user: {}", user_id);

        let name = required_text("Name", &command.name, MAX_NAME_LENGTH)?;
        let date_of_birth = parse_date("Date of birth", &command.date_of_birth)?;
        if date_of_birth > self.clock.today() {
            return Err(DomainError::validation("Date of birth cannot be in the future").into());
        }
        let weight_at_birth = positive_measurement("Birth weight", command.weight_at_birth)?;
        let height_at_birth = positive_measurement("Birth length", command.height_at_birth)?;
        let avatar_url = optional_text(command.avatar_url);

        let now = Utc::now();
        let candidate = BabyProfile {
            id: BabyProfile::generate_id(),
            user_id: user_id.to_string(),
            name,
            date_of_birth,
            gender: command.gender,
            weight_at_birth,
            height_at_birth,
            avatar_url,
            current_weight: None,
            current_height: None,
            created_at: now,
            updated_at: now,
        };

        if let Some(existing) = self.get_profile(user_id).await? {
            return self.update_existing(existing, candidate).await;
        }

        let created = self
            .repository
            .store_profile(&candidate)
            .await
            .context("Failed to create baby profile")?;
        if created {
            info!("Created profile: {} with ID: {}", candidate.name, candidate.id);
            return Ok(SaveProfileResult {
                profile: candidate,
                created: true,
            });
        }

        warn!("Profile for user {} was created concurrently, updating it instead", user_id);
        let existing = self.require_profile(user_id).await?;
        self.update_existing(existing, candidate).await
    }

    async fn update_existing(&self, mut profile: BabyProfile, changes: BabyProfile) -> Result<SaveProfileResult> {
        profile.name = changes.name;
        profile.date_of_birth = changes.date_of_birth;
        profile.gender = changes.gender;
        profile.weight_at_birth = changes.weight_at_birth;
        profile.height_at_birth = changes.height_at_birth;
        profile.avatar_url = changes.avatar_url;
        profile.updated_at = changes.updated_at;

        self.repository
            .update_profile(&profile)
            .await
            .context("Failed to update baby profile")?;
        info!("Updated profile: {} with ID: {}", profile.name, profile.id);
        Ok(SaveProfileResult { profile, created: false })
    }

    /// Age of the user's baby as of today
    pub async fn get_age(&self, user_id: &str) -> Result<AgeDisplay> {
        let profile = self.require_profile(user_id).await?;
        self.age_of(&profile)
    }

    /// Age of an already loaded profile as of today
    pub fn age_of(&self, profile: &BabyProfile) -> Result<AgeDisplay> {
        let today = self.clock.today();
        if profile.date_of_birth > today {
            return Err(DomainError::validation("Date of birth cannot be in the future").into());
        }
        Ok(compute_age(profile.date_of_birth, today))
    }

    pub(crate) fn repository(&self) -> &ProfileRepository {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use crate::test_support::{date, fixed_clock};
    use shared::Gender;

    async fn setup_test(today: &str) -> ProfileService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ProfileService::new(ProfileRepository::new(db), fixed_clock(today))
    }

    fn command(name: &str, dob: &str) -> SaveProfileCommand {
        SaveProfileCommand {
            name: name.to_string(),
            date_of_birth: dob.to_string(),
            gender: Gender::Male,
            weight_at_birth: Some(3.5),
            height_at_birth: Some(50.0),
            avatar_url: Some("  ".to_string()),
        }
    }

    fn validation_message(err: anyhow::Error) -> String {
        match err.downcast::<DomainError>() {
            Ok(DomainError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_an_error() {
        let service = setup_test("2024-03-20").await;
        assert!(service.get_profile("user-1").await.unwrap().is_none());

        let err = service.require_profile("user-1").await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::ProfileRequired));
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let service = setup_test("2024-03-20").await;

        let created = service.save_profile("user-1", command("  Ada ", "2024-01-15")).await.unwrap();
        assert!(created.created);
        assert_eq!(created.profile.name, "Ada");
        assert_eq!(created.profile.avatar_url, None);

        let updated = service.save_profile("user-1", command("Ada Grace", "2024-01-16")).await.unwrap();
        assert!(!updated.created);
        assert_eq!(updated.profile.id, created.profile.id);
        assert_eq!(updated.profile.created_at, created.profile.created_at);

        let stored = service.get_profile("user-1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada Grace");
        assert_eq!(stored.date_of_birth, date("2024-01-16"));
    }

    #[tokio::test]
    async fn test_concurrent_first_saves_both_succeed() {
        let service = setup_test("2024-03-20").await;
        let (first, second) = tokio::join!(
            service.save_profile("user-1", command("Leo", "2024-01-15")),
            service.save_profile("user-1", command("Leon", "2024-01-15"))
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!([first.created, second.created].iter().filter(|created| **created).count(), 1);
        assert_eq!(first.profile.id, second.profile.id);

        let stored = service.get_profile("user-1").await.unwrap().unwrap();
        assert_eq!(stored.id, first.profile.id);
    }

    #[tokio::test]
    async fn test_save_validation() {
        let service = setup_test("2024-03-20").await;

        let err = service.save_profile("user-1", command("   ", "2024-01-15")).await.unwrap_err();
        assert_eq!(validation_message(err), "Name cannot be empty");

        let long_name = "a".repeat(101);
        let err = service.save_profile("user-1", command(&long_name, "2024-01-15")).await.unwrap_err();
        assert_eq!(validation_message(err), "Name cannot exceed 100 characters");

        let err = service.save_profile("user-1", command("Ada", "15/01/2024")).await.unwrap_err();
        assert_eq!(
            validation_message(err),
            "Date of birth must be a valid date in YYYY-MM-DD format"
        );

        let err = service.save_profile("user-1", command("Ada", "2024-03-21")).await.unwrap_err();
        assert_eq!(validation_message(err), "Date of birth cannot be in the future");

        let mut negative = command("Ada", "2024-01-15");
        negative.weight_at_birth = Some(-1.0);
        let err = service.save_profile("user-1", negative).await.unwrap_err();
        assert_eq!(validation_message(err), "Birth weight must be a positive number");

        assert!(service.get_profile("user-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_age() {
        let service = setup_test("2024-03-20").await;
        service.save_profile("user-1", command("Ada", "2024-01-15")).await.unwrap();

        assert_eq!(service.get_age("user-1").await.unwrap(), AgeDisplay::Months { value: 2 });
        assert!(service.get_age("user-2").await.is_err());
    }
}
