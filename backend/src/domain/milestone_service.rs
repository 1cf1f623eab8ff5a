use anyhow::{Context, Result};
use chrono::Utc;
use shared::MilestoneCategory;
use tracing::info;

use crate::domain::commands::milestone::{AddMilestoneCommand, MilestoneListQuery};
use crate::domain::models::milestone::Milestone;
use crate::domain::profile_service::ProfileService;
use crate::domain::validation::{optional_text, parse_date, required_text};
use crate::storage::MilestoneRepository;

const MAX_TITLE_LENGTH: usize = 200;

/// Service for developmental milestones
#[derive(Clone)]
pub struct MilestoneService {
    repository: MilestoneRepository,
    profile_service: ProfileService,
}

impl MilestoneService {
    pub fn new(repository: MilestoneRepository, profile_service: ProfileService) -> Self {
        Self {
            repository,
            profile_service,
        }
    }

    /// Milestones for the user's baby, most recent first
    pub async fn list_milestones(&self, user_id: &str, query: MilestoneListQuery) -> Result<Vec<Milestone>> {
        let profile = self.profile_service.require_profile(user_id).await?;
        self.list_for_baby(&profile.id, query).await
    }

    pub async fn list_for_baby(&self, baby_id: &str, query: MilestoneListQuery) -> Result<Vec<Milestone>> {
        let milestones = self
            .repository
            .list_milestones(baby_id, query.category, query.limit)
            .await
            .context("Failed to load milestones")?;
        info!("Found {} milestones for baby {}", milestones.len(), baby_id);
        Ok(milestones)
    }

    /// Categories a milestone can be filed under, in display order
    pub fn categories(&self) -> Vec<MilestoneCategory> {
        MilestoneCategory::ALL.to_vec()
    }

    pub async fn add_milestone(&self, user_id: &str, command: AddMilestoneCommand) -> Result<Milestone> {
        info!("Adding milestone for user {}: {}", user_id, command.title);

        let title = required_text("Title", &command.title, MAX_TITLE_LENGTH)?;
        let date = parse_date("Date", &command.date)?;
        let profile = self.profile_service.require_profile(user_id).await?;

        let milestone = Milestone {
            id: Milestone::generate_id(),
            baby_id: profile.id,
            title,
            date,
            category: command.category,
            description: optional_text(command.description),
            created_at: Utc::now(),
        };

        self.repository
            .store_milestone(&milestone)
            .await
            .context("Failed to store milestone")?;

        info!("Created milestone {} with ID: {}", milestone.title, milestone.id);
        Ok(milestone)
    }
}
