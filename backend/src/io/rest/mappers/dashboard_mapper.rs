use crate::domain::dashboard_service::Dashboard;
use crate::domain::units::{format_length, format_weight};
use crate::io::rest::mappers::{GrowthMapper, JournalMapper, MilestoneMapper, ProfileMapper, VaccinationMapper};
use shared::DashboardResponse;

/// Mapper from the domain dashboard to its DTO, with display text filled in.
pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_response(dashboard: Option<Dashboard>) -> DashboardResponse {
        let Some(dashboard) = dashboard else {
            return DashboardResponse::without_profile();
        };

        let profile = &dashboard.profile;
        DashboardResponse {
            has_profile: true,
            age: Some(dashboard.age),
            age_text: Some(dashboard.age.to_string()),
            birth_weight_text: profile.weight_at_birth.map(format_weight),
            birth_length_text: profile.height_at_birth.map(format_length),
            current_weight_text: profile.current_weight.map(format_weight),
            current_height_text: profile.current_height.map(format_length),
            profile: Some(ProfileMapper::to_dto(dashboard.profile)),
            latest_growth: dashboard.latest_growth.map(GrowthMapper::to_dto),
            recent_milestones: dashboard
                .recent_milestones
                .into_iter()
                .map(MilestoneMapper::to_dto)
                .collect(),
            upcoming_vaccinations: dashboard
                .upcoming_vaccinations
                .into_iter()
                .map(VaccinationMapper::to_dto)
                .collect(),
            recent_journal_entries: dashboard
                .recent_journal_entries
                .into_iter()
                .map(JournalMapper::to_dto)
                .collect(),
        }
    }
}
