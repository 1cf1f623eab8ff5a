use crate::domain::commands::milestone::AddMilestoneCommand;
use crate::domain::models::milestone::Milestone as DomainMilestone;
use crate::io::rest::mappers::format_iso_date;
use shared::{
    CreateMilestoneRequest, Milestone as SharedMilestone, MilestoneCategoriesResponse, MilestoneCategory,
    MilestoneCategoryInfo, MilestoneListResponse, MilestoneResponse,
};

/// Mapper to convert between shared milestone DTOs and domain milestones.
pub struct MilestoneMapper;

impl MilestoneMapper {
    pub fn to_command(request: CreateMilestoneRequest) -> AddMilestoneCommand {
        AddMilestoneCommand {
            title: request.title,
            date: request.date,
            category: request.category,
            description: request.description,
        }
    }

    pub fn to_dto(domain: DomainMilestone) -> SharedMilestone {
        SharedMilestone {
            id: domain.id,
            baby_id: domain.baby_id,
            title: domain.title,
            date: format_iso_date(domain.date),
            category: domain.category,
            description: domain.description,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(milestones: Vec<DomainMilestone>) -> MilestoneListResponse {
        MilestoneListResponse {
            milestones: milestones.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_milestone_response(domain: DomainMilestone) -> MilestoneResponse {
        MilestoneResponse {
            milestone: Self::to_dto(domain),
            success_message: "Milestone added successfully".to_string(),
        }
    }

    pub fn to_categories_response(categories: Vec<MilestoneCategory>) -> MilestoneCategoriesResponse {
        MilestoneCategoriesResponse {
            categories: categories
                .into_iter()
                .map(|category| MilestoneCategoryInfo {
                    id: category,
                    name: category.display_name().to_string(),
                })
                .collect(),
        }
    }
}
