use anyhow::Result;
use shared::AgeDisplay;
use tracing::info;

use crate::domain::commands::milestone::MilestoneListQuery;
use crate::domain::growth_service::GrowthService;
use crate::domain::journal_service::JournalService;
use crate::domain::milestone_service::MilestoneService;
use crate::domain::models::growth::GrowthRecord;
use crate::domain::models::journal::JournalEntry;
use crate::domain::models::milestone::Milestone;
use crate::domain::models::profile::BabyProfile;
use crate::domain::models::vaccination::Vaccination;
use crate::domain::profile_service::ProfileService;
use crate::domain::vaccination_service::VaccinationService;
use crate::storage::VaccinationRepository;

const RECENT_ITEMS: u32 = 3;

/// Everything the home page shows for a baby
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub profile: BabyProfile,
    pub age: AgeDisplay,
    pub latest_growth: Option<GrowthRecord>,
    pub recent_milestones: Vec<Milestone>,
    pub upcoming_vaccinations: Vec<Vaccination>,
    pub recent_journal_entries: Vec<JournalEntry>,
}

/// Read-only summary across all record types
#[derive(Clone)]
pub struct DashboardService {
    profile_service: ProfileService,
    growth_service: GrowthService,
    milestone_service: MilestoneService,
    journal_service: JournalService,
    vaccination_service: VaccinationService<VaccinationRepository>,
}

impl DashboardService {
    pub fn new(
        profile_service: ProfileService,
        growth_service: GrowthService,
        milestone_service: MilestoneService,
        journal_service: JournalService,
        vaccination_service: VaccinationService<VaccinationRepository>,
    ) -> Self {
        Self {
            profile_service,
            growth_service,
            milestone_service,
            journal_service,
            vaccination_service,
        }
    }

    /// `None` when the user has not created a profile yet
    pub async fn dashboard(&self, user_id: &str) -> Result<Option<Dashboard>> {
        let Some(profile) = self.profile_service.get_profile(user_id).await? else {
            info!("Dashboard requested before profile exists for user: {}", user_id);
            return Ok(None);
        };

        let age = self.profile_service.age_of(&profile)?;
        let latest_growth = self.growth_service.latest_record(&profile.id).await?;
        let recent_milestones = self
            .milestone_service
            .list_for_baby(
                &profile.id,
                MilestoneListQuery {
                    category: None,
                    limit: Some(RECENT_ITEMS),
                },
            )
            .await?;
        let upcoming_vaccinations = self
            .vaccination_service
            .upcoming_for_baby(&profile.id, RECENT_ITEMS)
            .await?;
        let recent_journal_entries = self
            .journal_service
            .list_for_baby(&profile.id, Some(RECENT_ITEMS))
            .await?;

        Ok(Some(Dashboard {
            profile,
            age,
            latest_growth,
            recent_milestones,
            upcoming_vaccinations,
            recent_journal_entries,
        }))
    }
}
